//! Emulated display refresh for hosts without one.
//!
//! Browsers deliver a pulse per animation frame. Native hosts can instead
//! measure elapsed wall time and ask a [`FrameClock`] how many pulses are due.

use std::time::Duration;

/// Typical display refresh rate.
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Shortest representable period.
const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// Pulses delivered at most per `advance()` after a stall.
pub const DEFAULT_MAX_CATCH_UP: u32 = 4;

/// Converts elapsed time into a count of due pulses.
///
/// Leftover time below one period is carried into the next call. After a
/// long stall at most `max_catch_up` pulses are reported and the rest of the
/// backlog is dropped, so a slow host falls behind instead of running every
/// missed frame back to back.
///
/// # Examples
///
/// ```
/// use chip8_pulse::FrameClock;
/// use std::time::Duration;
///
/// let mut clock = FrameClock::new(60);
/// assert_eq!(clock.advance(Duration::from_millis(10)), 0);
/// assert_eq!(clock.advance(Duration::from_millis(10)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    period: Duration,
    carry: Duration,
    max_catch_up: u32,
}

impl FrameClock {
    /// Creates a clock pulsing `refresh_hz` times per second.
    ///
    /// A rate of zero is treated as one pulse per second. The period never
    /// drops below one nanosecond.
    pub fn new(refresh_hz: u32) -> Self {
        Self {
            period: (Duration::from_secs(1) / refresh_hz.max(1)).max(MIN_PERIOD),
            carry: Duration::ZERO,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }

    /// Limits how many pulses a single `advance()` may report.
    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    /// Time between pulses.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time until the next pulse is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.carry)
    }

    /// Adds `elapsed` and returns the number of pulses now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;

        let due = self.carry.as_nanos() / self.period.as_nanos();
        if due > u128::from(self.max_catch_up) {
            tracing::debug!(
                due = due as u64,
                delivered = self.max_catch_up,
                "frame clock dropping backlog"
            );
            self.carry = Duration::ZERO;
            return self.max_catch_up;
        }

        let due = due as u32;
        self.carry -= self.period * due;
        due
    }

    /// Forgets any carried time.
    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_HZ)
    }
}
