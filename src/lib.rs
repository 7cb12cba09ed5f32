//! # CHIP-8 Decoder and Pulse Scheduler
//!
//! Decodes CHIP-8 opcodes into structured instruction descriptors and paces
//! an external CHIP-8 engine against a host timing pulse such as the display
//! refresh.
//!
//! The virtual machine itself is not part of this crate. It is supplied by
//! the host as an [`Engine`], whose only obligation is to execute one
//! instruction per `tick()` and report the opcode it ran.
//!
//! ## Quick Start
//!
//! ```rust
//! use chip8_pulse::{decode, Mnemonic, Opcode, ReplayEngine, Scheduler};
//!
//! // Decoding is pure and total
//! let instr = decode(Opcode::new(0xD123));
//! assert_eq!(instr.mnemonic, Mnemonic::Draw);
//! assert_eq!((instr.x, instr.y, instr.n), (1, 2, 3));
//!
//! // The scheduler runs ten cycles per pulse at normal speed
//! let mut scheduler = Scheduler::new(ReplayEngine::new(vec![0x00E0u16, 0x1200]));
//! scheduler.on_pulse().unwrap();
//! assert_eq!(scheduler.total_cycles(), 10);
//! assert_eq!(scheduler.history().latest().unwrap().mnemonic, Mnemonic::Jump);
//! ```
//!
//! ## Architecture
//!
//! - **Decode then schedule**: the decoder is a leaf with no state; the
//!   scheduler owns all mutable run state
//! - **Injected engine**: the scheduler is generic over the `Engine` trait and
//!   never sees the machine's internals
//! - **Explicit pulses**: the host calls `Scheduler::on_pulse()` once per
//!   frame; nothing in the crate owns an event loop
//! - **WebAssembly Portability**: no OS dependencies; bindings behind the
//!   `wasm` feature
//!
//! ## Modules
//!
//! - `opcode` - Opcode newtype and field extraction
//! - `mnemonics` - Catalog of operation categories
//! - `disassembler` - Decoding, formatting and ROM disassembly
//! - `engine` - Engine trait and stock implementations
//! - `speed` - Rational speed multiplier
//! - `history` - Bounded instruction history
//! - `scheduler` - Run state and per-pulse execution
//! - `clock` - Emulated refresh pulses for native hosts

pub mod clock;
pub mod disassembler;
pub mod engine;
pub mod history;
pub mod mnemonics;
pub mod opcode;
pub mod scheduler;
pub mod speed;
pub mod wasm;

use thiserror::Error;

// Re-export public API
pub use clock::FrameClock;
pub use disassembler::decoder::{decode, decode_strict, decode_with};
pub use disassembler::formatter::{format_descriptor, format_value, history_row, Base};
pub use disassembler::{
    disassemble, DecodeOptions, Disassembly, DisassemblyOptions, Instruction,
    InstructionDescriptor, ZeroGroupPolicy,
};
pub use engine::{Engine, FnEngine, ReplayEngine};
pub use history::InstructionHistory;
pub use mnemonics::Mnemonic;
pub use opcode::Opcode;
pub use scheduler::{
    PulseReport, RunMode, RunState, Scheduler, SchedulerConfig, BASE_CYCLES_PER_PULSE,
};
pub use speed::Speed;

/// Errors reported by the strict decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No catalog entry matches the opcode.
    ///
    /// [`decode`] maps these to "No Operation" instead; only
    /// [`decode_strict`] reports them.
    #[error("opcode {0} is not a recognised CHIP-8 instruction")]
    UnrecognizedOpcode(Opcode),
}

/// Errors surfaced by the scheduler to its host.
#[derive(Debug, PartialEq, Error)]
pub enum SchedulerError<E: std::error::Error + 'static> {
    /// The engine failed; the scheduler has paused itself.
    ///
    /// `cycles` counts the cycles completed earlier in the same pulse.
    #[error("engine failed after {cycles} cycles: {source}")]
    EngineFailure {
        cycles: u32,
        #[source]
        source: E,
    },
}

/// Invalid speed multipliers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeedError {
    #[error("speed numerator must be positive")]
    ZeroNumerator,

    #[error("speed denominator must be positive")]
    ZeroDenominator,

    #[error("speed must be a finite number")]
    NotFinite,

    #[error("speed must be greater than zero")]
    NotPositive,

    #[error("speed {0} is outside the supported range")]
    OutOfRange(f64),

    #[error("cannot parse speed from {0:?}")]
    Parse(String),
}

/// Errors reported by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unsupported base {0}; expected 10 or 16")]
    UnsupportedBase(u32),
}
