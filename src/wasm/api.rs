//! WASM API for the CHIP-8 scheduler.
//!
//! Provides JavaScript-callable interfaces for run control, instruction
//! history and opcode decoding. The page drives the session by calling
//! `pulse()` from its `requestAnimationFrame` callback.

use wasm_bindgen::prelude::*;

use crate::disassembler::formatter::{self, Base};
use crate::{decode, Engine, InstructionDescriptor, Opcode, Scheduler, Speed};

/// Failure of the JavaScript tick function
#[derive(Debug, thiserror::Error)]
pub enum JsEngineError {
    #[error("tick function threw: {0}")]
    Threw(String),

    #[error("tick function returned {0}, expected an opcode in 0..=0xFFFF")]
    NotAnOpcode(String),
}

/// Engine backed by a JavaScript function
///
/// The function must return either the executed opcode as a number, or an
/// object with an `op_code` property. Objects exposing a `free()` method are
/// released once the opcode has been read.
struct JsEngine {
    tick: js_sys::Function,
}

impl Engine for JsEngine {
    type Error = JsEngineError;

    fn tick(&mut self) -> Result<Opcode, Self::Error> {
        let result = self
            .tick
            .call0(&JsValue::NULL)
            .map_err(|e| JsEngineError::Threw(describe(&e)))?;

        if let Some(number) = result.as_f64() {
            return opcode_from_number(number).ok_or_else(|| JsEngineError::NotAnOpcode(describe(&result)));
        }

        let op_code = js_sys::Reflect::get(&result, &JsValue::from_str("op_code"))
            .map_err(|e| JsEngineError::Threw(describe(&e)))?;
        release(&result);

        op_code
            .as_f64()
            .and_then(opcode_from_number)
            .ok_or_else(|| JsEngineError::NotAnOpcode(describe(&op_code)))
    }
}

fn opcode_from_number(number: f64) -> Option<Opcode> {
    if number.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&number) {
        Some(Opcode::new(number as u16))
    } else {
        None
    }
}

/// Calls `value.free()` when the tick result owns wasm memory.
fn release(value: &JsValue) {
    let Ok(free) = js_sys::Reflect::get(value, &JsValue::from_str("free")) else {
        return;
    };
    if let Some(free) = free.dyn_ref::<js_sys::Function>() {
        if let Err(e) = free.call0(value) {
            tracing::warn!(error = %describe(&e), "tick result free() failed, object leaked");
        }
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl JsError {
    fn from_display(error: impl std::fmt::Display) -> JsError {
        JsError {
            message: error.to_string(),
        }
    }
}

/// One decoded instruction, as shown in an instruction history table
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct InstructionRow {
    opcode: u16,
    name: String,
    x: u8,
    y: u8,
    n: u8,
    kk: u8,
    addr: u16,
}

impl From<&InstructionDescriptor> for InstructionRow {
    fn from(instr: &InstructionDescriptor) -> Self {
        InstructionRow {
            opcode: instr.opcode.value(),
            name: instr.label().to_string(),
            x: instr.x,
            y: instr.y,
            n: instr.n,
            kk: instr.kk,
            addr: instr.addr,
        }
    }
}

#[wasm_bindgen]
impl InstructionRow {
    #[wasm_bindgen(getter)]
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn n(&self) -> u8 {
        self.n
    }

    #[wasm_bindgen(getter)]
    pub fn kk(&self) -> u8 {
        self.kk
    }

    #[wasm_bindgen(getter)]
    pub fn addr(&self) -> u16 {
        self.addr
    }

    /// The row's cells as hexadecimal strings, opcode first
    pub fn cells(&self) -> Vec<JsValue> {
        self.cell_text()
            .iter()
            .map(|cell| JsValue::from_str(cell))
            .collect()
    }
}

impl InstructionRow {
    /// Formats the stored fields; never decodes again.
    fn cell_text(&self) -> [String; 7] {
        let hex = |value: u32| formatter::format_value(value, Base::Hexadecimal);
        [
            hex(self.opcode.into()),
            self.name.clone(),
            hex(self.x.into()),
            hex(self.y.into()),
            hex(self.n.into()),
            hex(self.kk.into()),
            hex(self.addr.into()),
        ]
    }
}

/// Paced CHIP-8 session for JavaScript
#[wasm_bindgen]
pub struct Chip8Session {
    scheduler: Scheduler<JsEngine>,
}

#[wasm_bindgen]
impl Chip8Session {
    /// Create a running session around a JavaScript tick function
    #[wasm_bindgen(constructor)]
    pub fn new(tick: js_sys::Function) -> Self {
        console_error_panic_hook::set_once();

        Chip8Session {
            scheduler: Scheduler::new(JsEngine { tick }),
        }
    }

    /// Handle one animation frame and return the cycles executed
    pub fn pulse(&mut self) -> Result<u32, JsError> {
        self.scheduler
            .on_pulse()
            .map(|report| report.executed)
            .map_err(JsError::from_display)
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    /// Execute one cycle while paused; returns the opcode, if any
    pub fn step(&mut self) -> Result<Option<u16>, JsError> {
        self.scheduler
            .step()
            .map(|instr| instr.map(|instr| instr.opcode.value()))
            .map_err(JsError::from_display)
    }

    /// Set the speed multiplier used from the next frame
    pub fn set_speed(&mut self, speed: f64) -> Result<(), JsError> {
        let speed = Speed::try_from(speed).map_err(JsError::from_display)?;
        self.scheduler.set_speed(speed);
        Ok(())
    }

    /// Enable or disable instruction history capture
    pub fn set_capture(&mut self, capture: bool) {
        self.scheduler.set_capture(capture);
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f64 {
        self.scheduler.speed().as_f64()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles_per_pulse(&self) -> u32 {
        self.scheduler.cycles_per_pulse()
    }

    #[wasm_bindgen(getter)]
    pub fn total_cycles(&self) -> f64 {
        self.scheduler.total_cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Recently executed instructions, newest first
    pub fn history(&self) -> Vec<JsValue> {
        self.scheduler
            .history()
            .iter()
            .map(|instr| JsValue::from(InstructionRow::from(instr)))
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.scheduler.clear_history();
    }
}

/// Decode a single opcode
#[wasm_bindgen]
pub fn decode_opcode(opcode: u16) -> InstructionRow {
    InstructionRow::from(&decode(Opcode::new(opcode)))
}

/// Format a value in base 10 or 16
#[wasm_bindgen]
pub fn format_value(value: u32, base: u32) -> Result<String, JsError> {
    let base = Base::try_from(base).map_err(JsError::from_display)?;
    Ok(formatter::format_value(value, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_with, DecodeOptions, ZeroGroupPolicy};

    #[test]
    fn test_cells_follow_stored_fields() {
        let options = DecodeOptions {
            zero_group: ZeroGroupPolicy::LowNibble,
        };
        let row = InstructionRow::from(&decode_with(Opcode::new(0x0123), options));

        let cells = row.cell_text();
        assert_eq!(cells[1], row.name);
        assert_eq!(cells, ["0x123", "Return", "0x1", "0x2", "0x3", "0x23", "0x123"]);
    }

    #[test]
    fn test_decode_opcode_row() {
        let row = decode_opcode(0xD123);
        assert_eq!(row.name(), "Draw N at (Vx, Vy)");
        assert_eq!((row.x(), row.y(), row.n()), (1, 2, 3));
    }

    #[test]
    fn test_opcode_from_number_bounds() {
        assert_eq!(opcode_from_number(4660.0), Some(Opcode::new(0x1234)));
        assert_eq!(opcode_from_number(65536.0), None);
        assert_eq!(opcode_from_number(-1.0), None);
        assert_eq!(opcode_from_number(1.5), None);
    }
}
