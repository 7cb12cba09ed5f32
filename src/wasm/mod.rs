//! WebAssembly bindings for the decoder and scheduler.
//!
//! This module exposes a JavaScript-callable session that paces a CHIP-8
//! engine living on the JavaScript side, plus the decoder and formatter for
//! instruction history displays.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::{Chip8Session, InstructionRow};
