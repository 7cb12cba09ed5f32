//! # Speed Multiplier
//!
//! The scheduler executes `speed × base` engine cycles per pulse. Speeds are
//! kept as reduced positive rationals so that presets like one half stay
//! exact and the cycle count for a pulse never depends on float rounding.

use std::fmt;
use std::str::FromStr;

use crate::SpeedError;

/// Largest denominator used when approximating a float speed.
const MAX_FLOAT_DENOMINATOR: u32 = 1000;

/// A positive rational speed multiplier.
///
/// # Examples
///
/// ```
/// use chip8_pulse::Speed;
///
/// assert_eq!(Speed::NORMAL.cycles_for(10), 10);
/// assert_eq!(Speed::HALF.cycles_for(10), 5);
/// assert_eq!(Speed::TRIPLE.cycles_for(10), 30);
///
/// let custom: Speed = "3/2".parse().unwrap();
/// assert_eq!(custom.cycles_for(10), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSpeed", into = "RawSpeed"))]
pub struct Speed {
    numerator: u32,
    denominator: u32,
}

impl Speed {
    /// Half speed.
    pub const HALF: Speed = Speed {
        numerator: 1,
        denominator: 2,
    };

    /// Normal speed, the scheduler's default.
    pub const NORMAL: Speed = Speed::from_integer_unchecked(1);

    /// Double speed.
    pub const DOUBLE: Speed = Speed::from_integer_unchecked(2);

    /// Triple speed.
    pub const TRIPLE: Speed = Speed::from_integer_unchecked(3);

    /// The usual speed selector choices, slowest first.
    pub const PRESETS: [Speed; 4] = [Speed::HALF, Speed::NORMAL, Speed::DOUBLE, Speed::TRIPLE];

    const fn from_integer_unchecked(value: u32) -> Speed {
        Speed {
            numerator: value,
            denominator: 1,
        }
    }

    /// Creates the speed `numerator / denominator`, reduced to lowest terms.
    pub fn new(numerator: u32, denominator: u32) -> Result<Speed, SpeedError> {
        if denominator == 0 {
            return Err(SpeedError::ZeroDenominator);
        }
        if numerator == 0 {
            return Err(SpeedError::ZeroNumerator);
        }
        let divisor = gcd(numerator, denominator);
        Ok(Speed {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// Creates a whole-number speed.
    pub fn from_integer(value: u32) -> Result<Speed, SpeedError> {
        Speed::new(value, 1)
    }

    pub fn numerator(self) -> u32 {
        self.numerator
    }

    pub fn denominator(self) -> u32 {
        self.denominator
    }

    /// Returns the multiplier as a float, for display.
    pub fn as_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Number of cycles to run for a pulse with the given base rate.
    ///
    /// Rounds half up, so `2.5` cycles becomes `3`. A result that does not
    /// fit in `u32` saturates.
    pub fn cycles_for(self, base: u32) -> u32 {
        let scaled = u128::from(base) * u128::from(self.numerator);
        let denominator = u128::from(self.denominator);
        let rounded = (2 * scaled + denominator) / (2 * denominator);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::NORMAL
    }
}

impl TryFrom<f64> for Speed {
    type Error = SpeedError;

    /// Approximates `value` with a denominator of at most 1000.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(SpeedError::NotFinite);
        }
        if value <= 0.0 {
            return Err(SpeedError::NotPositive);
        }
        let scaled = (value * f64::from(MAX_FLOAT_DENOMINATOR)).round();
        if scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(SpeedError::OutOfRange(value));
        }
        Speed::new(scaled as u32, MAX_FLOAT_DENOMINATOR)
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    /// Parses `"2"`, `"0.5"`, `"3/2"`, each optionally followed by `x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let text = text.strip_suffix(['x', 'X']).unwrap_or(text).trim();
        let parse_error = || SpeedError::Parse(s.to_string());

        if let Some((numerator, denominator)) = text.split_once('/') {
            let numerator = numerator.trim().parse().map_err(|_| parse_error())?;
            let denominator = denominator.trim().parse().map_err(|_| parse_error())?;
            return Speed::new(numerator, denominator);
        }
        if let Ok(whole) = text.parse::<u32>() {
            return Speed::from_integer(whole);
        }
        let value: f64 = text.parse().map_err(|_| parse_error())?;
        Speed::try_from(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            return write!(f, "{}x", self.numerator);
        }
        if terminates_in_decimal(self.denominator) {
            return write!(f, "{}x", self.as_f64());
        }
        write!(f, "{}/{}x", self.numerator, self.denominator)
    }
}

/// Serialized form of [`Speed`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawSpeed {
    numerator: u32,
    denominator: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpeed> for Speed {
    type Error = SpeedError;

    fn try_from(raw: RawSpeed) -> Result<Self, Self::Error> {
        Speed::new(raw.numerator, raw.denominator)
    }
}

#[cfg(feature = "serde")]
impl From<Speed> for RawSpeed {
    fn from(speed: Speed) -> Self {
        RawSpeed {
            numerator: speed.numerator,
            denominator: speed.denominator,
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// True when `1 / denominator` has a finite decimal expansion.
fn terminates_in_decimal(mut denominator: u32) -> bool {
    for factor in [2, 5] {
        while denominator % factor == 0 {
            denominator /= factor;
        }
    }
    denominator == 1
}
