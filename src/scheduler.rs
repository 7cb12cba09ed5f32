//! # Execution Scheduler
//!
//! The scheduler paces an [`Engine`] against a host timing pulse, normally
//! the display refresh. It owns the run state and, on every pulse, decides
//! how many engine cycles to execute.
//!
//! ## State Machine
//!
//! ```text
//!            pause()                step(): one cycle
//!   Running ---------> Paused <-------------------+
//!      ^                 |  |                     |
//!      +-----------------+  +---------------------+
//!            resume()
//! ```
//!
//! - Pulses in `Running` execute `round(speed × base)` cycles
//! - Pulses in `Paused` execute nothing but are still expected, so that a
//!   later `resume()` takes effect on the very next frame
//! - `step()` runs exactly one cycle, and only while paused
//! - Engine failure pauses the scheduler and is returned to the host
//!
//! ## Diagnostic Capture
//!
//! With capture enabled every executed opcode is decoded and pushed into a
//! bounded [`InstructionHistory`]. With capture disabled opcodes are dropped
//! without being decoded.

use tracing::{debug, trace, warn};

use crate::disassembler::decoder::decode_with;
use crate::disassembler::{DecodeOptions, InstructionDescriptor};
use crate::engine::Engine;
use crate::history::{InstructionHistory, HISTORY_CAPACITY};
use crate::opcode::Opcode;
use crate::speed::Speed;
use crate::SchedulerError;

/// Engine cycles executed per pulse at normal speed.
pub const BASE_CYCLES_PER_PULSE: u32 = 10;

/// Whether pulses execute engine cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunMode {
    #[default]
    Running,
    Paused,
}

/// Mutable state owned by the scheduler for the length of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub mode: RunMode,
    pub speed: Speed,
}

impl RunState {
    pub fn is_paused(&self) -> bool {
        self.mode == RunMode::Paused
    }
}

/// Options controlling a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Cycles per pulse at a speed of 1
    pub base_cycles_per_pulse: u32,

    /// Speed in effect before the first `set_speed()`
    pub initial_speed: Speed,

    /// Whether executed opcodes are decoded into the history
    pub capture: bool,

    /// Number of history rows retained
    pub history_capacity: usize,

    /// Decoder options used for captured opcodes
    pub decode: DecodeOptions,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_cycles_per_pulse: BASE_CYCLES_PER_PULSE,
            initial_speed: Speed::NORMAL,
            capture: true,
            history_capacity: HISTORY_CAPACITY,
            decode: DecodeOptions::default(),
        }
    }
}

/// What a single pulse did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseReport {
    /// Mode the pulse was handled in
    pub mode: RunMode,

    /// Cycles computed at the start of the pulse
    pub planned: u32,

    /// Cycles actually executed
    pub executed: u32,
}

/// Paces an [`Engine`] against host timing pulses.
///
/// # Examples
///
/// ```
/// use chip8_pulse::{ReplayEngine, Scheduler, Speed};
///
/// let mut scheduler = Scheduler::new(ReplayEngine::new(vec![0x00E0u16, 0x1200]));
///
/// // One display frame at normal speed runs ten cycles.
/// let report = scheduler.on_pulse().unwrap();
/// assert_eq!(report.executed, 10);
///
/// scheduler.set_speed(Speed::HALF);
/// assert_eq!(scheduler.on_pulse().unwrap().executed, 5);
///
/// scheduler.pause();
/// assert_eq!(scheduler.on_pulse().unwrap().executed, 0);
/// assert!(scheduler.step().unwrap().is_some());
/// assert_eq!(scheduler.engine().ticks(), 16);
/// ```
pub struct Scheduler<E: Engine> {
    engine: E,
    state: RunState,
    config: SchedulerConfig,
    history: InstructionHistory,
    total_cycles: u64,
    pulses: u64,
}

impl<E: Engine> Scheduler<E> {
    /// Creates a running scheduler with the default configuration.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, SchedulerConfig::default())
    }

    /// Creates a running scheduler with an explicit configuration.
    pub fn with_config(engine: E, config: SchedulerConfig) -> Self {
        Self {
            engine,
            state: RunState {
                mode: RunMode::Running,
                speed: config.initial_speed,
            },
            config,
            history: InstructionHistory::new(config.history_capacity),
            total_cycles: 0,
            pulses: 0,
        }
    }

    /// Handles one host timing pulse.
    ///
    /// The cycle count is fixed when the pulse starts. While paused no
    /// cycles run and the report is all zeros.
    ///
    /// # Errors
    ///
    /// `SchedulerError::EngineFailure` if the engine fails; the scheduler is
    /// left paused and `cycles` holds the count completed before the failure.
    pub fn on_pulse(&mut self) -> Result<PulseReport, SchedulerError<E::Error>> {
        self.pulses += 1;

        if self.state.is_paused() {
            trace!(pulse = self.pulses, "pulse ignored while paused");
            return Ok(PulseReport {
                mode: RunMode::Paused,
                planned: 0,
                executed: 0,
            });
        }

        let planned = self.cycles_per_pulse();
        for executed in 0..planned {
            if let Err(source) = self.execute_cycle() {
                return Err(self.halt(executed, source));
            }
        }

        trace!(pulse = self.pulses, cycles = planned, "pulse complete");
        Ok(PulseReport {
            mode: RunMode::Running,
            planned,
            executed: planned,
        })
    }

    /// Stops executing cycles on subsequent pulses.
    pub fn pause(&mut self) {
        if !self.state.is_paused() {
            debug!(total_cycles = self.total_cycles, "paused");
        }
        self.state.mode = RunMode::Paused;
    }

    /// Resumes executing cycles from the next pulse.
    pub fn resume(&mut self) {
        if self.state.is_paused() {
            debug!(total_cycles = self.total_cycles, "resumed");
        }
        self.state.mode = RunMode::Running;
    }

    /// Executes exactly one engine cycle while paused.
    ///
    /// Speed is ignored. While running this does nothing and returns
    /// `Ok(None)`.
    ///
    /// # Returns
    ///
    /// The stepped opcode, decoded with the configured options whether or
    /// not capture is enabled
    pub fn step(&mut self) -> Result<Option<InstructionDescriptor>, SchedulerError<E::Error>> {
        if !self.state.is_paused() {
            trace!("step ignored while running");
            return Ok(None);
        }

        match self.execute_cycle() {
            Ok(opcode) => {
                let instr = decode_with(opcode, self.config.decode);
                debug!(
                    %opcode,
                    mnemonic = instr.label(),
                    total_cycles = self.total_cycles,
                    "stepped"
                );
                Ok(Some(instr))
            }
            Err(source) => Err(self.halt(0, source)),
        }
    }

    /// Changes the speed used from the next pulse on.
    pub fn set_speed(&mut self, speed: Speed) {
        if speed != self.state.speed {
            debug!(from = %self.state.speed, to = %speed, "speed changed");
        }
        self.state.speed = speed;
    }

    /// Enables or disables diagnostic capture.
    ///
    /// Disabling capture keeps the rows already recorded.
    pub fn set_capture(&mut self, capture: bool) {
        self.config.capture = capture;
    }

    /// Cycles the next running pulse will execute.
    pub fn cycles_per_pulse(&self) -> u32 {
        self.state.speed.cycles_for(self.config.base_cycles_per_pulse)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn mode(&self) -> RunMode {
        self.state.mode
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn speed(&self) -> Speed {
        self.state.speed
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Engine cycles executed since construction, including steps.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Pulses received since construction, including paused ones.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    /// Recently executed instructions, newest first.
    pub fn history(&self) -> &InstructionHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the scheduler and returns its engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn execute_cycle(&mut self) -> Result<Opcode, E::Error> {
        let opcode = self.engine.tick()?;
        self.total_cycles += 1;

        if self.config.capture {
            let instr = decode_with(opcode, self.config.decode);
            trace!(%opcode, mnemonic = instr.label(), "executed");
            self.history.push(instr);
        }

        Ok(opcode)
    }

    /// Pauses after an engine failure and wraps the error for the host.
    fn halt(&mut self, cycles: u32, source: E::Error) -> SchedulerError<E::Error> {
        warn!(cycles, error = %source, "engine failed, pausing");
        self.state.mode = RunMode::Paused;
        SchedulerError::EngineFailure { cycles, source }
    }
}
