//! Formatting functions for decoded instructions

use crate::disassembler::InstructionDescriptor;
use crate::FormatError;

/// Numeric base used when rendering operand fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base {
    /// Plain decimal digits
    Decimal,

    /// `0x` prefix followed by upper-case digits
    #[default]
    Hexadecimal,
}

impl TryFrom<u32> for Base {
    type Error = FormatError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            10 => Ok(Base::Decimal),
            16 => Ok(Base::Hexadecimal),
            other => Err(FormatError::UnsupportedBase(other)),
        }
    }
}

/// Format an integer field in the requested base
///
/// Hexadecimal output is never zero-padded, so `0x0` and `0xABC` are both
/// valid results.
///
/// # Examples
///
/// ```
/// use chip8_pulse::{format_value, Base};
///
/// assert_eq!(format_value(0xABC, Base::Hexadecimal), "0xABC");
/// assert_eq!(format_value(10, Base::Decimal), "10");
/// ```
pub fn format_value(value: u32, base: Base) -> String {
    match base {
        Base::Decimal => value.to_string(),
        Base::Hexadecimal => format!("0x{:X}", value),
    }
}

/// Format a descriptor as a single line of text
///
/// # Returns
///
/// The opcode, its label and every operand field, e.g.
/// `0xD123 Draw N at (Vx, Vy) x=0x1 y=0x2 n=0x3 kk=0x23 addr=0x123`
pub fn format_descriptor(instr: &InstructionDescriptor, base: Base) -> String {
    format!(
        "{} {} x={} y={} n={} kk={} addr={}",
        format_value(instr.opcode.value().into(), base),
        instr.label(),
        format_value(instr.x.into(), base),
        format_value(instr.y.into(), base),
        format_value(instr.n.into(), base),
        format_value(instr.kk.into(), base),
        format_value(instr.addr.into(), base),
    )
}

/// Column headings matching [`history_row`].
pub const HISTORY_COLUMNS: [&str; 7] = ["Opcode", "Name", "X", "Y", "N", "KK", "ADDR"];

/// Render a descriptor as the seven columns of an instruction history table
///
/// Numeric columns are hexadecimal.
pub fn history_row(instr: &InstructionDescriptor) -> [String; 7] {
    let hex = |value: u32| format_value(value, Base::Hexadecimal);
    [
        hex(instr.opcode.value().into()),
        instr.label().to_string(),
        hex(instr.x.into()),
        hex(instr.y.into()),
        hex(instr.n.into()),
        hex(instr.kk.into()),
        hex(instr.addr.into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, Opcode};

    #[test]
    fn test_format_hex_is_upper_case_and_unpadded() {
        assert_eq!(format_value(0xabc, Base::Hexadecimal), "0xABC");
        assert_eq!(format_value(0, Base::Hexadecimal), "0x0");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_value(10, Base::Decimal), "10");
        assert_eq!(format_value(0, Base::Decimal), "0");
    }

    #[test]
    fn test_base_from_radix() {
        assert_eq!(Base::try_from(16), Ok(Base::Hexadecimal));
        assert_eq!(Base::try_from(10), Ok(Base::Decimal));
        assert_eq!(Base::try_from(2), Err(FormatError::UnsupportedBase(2)));
    }

    #[test]
    fn test_format_descriptor_line() {
        let instr = decode(Opcode::new(0xD123));
        assert_eq!(
            format_descriptor(&instr, Base::Hexadecimal),
            "0xD123 Draw N at (Vx, Vy) x=0x1 y=0x2 n=0x3 kk=0x23 addr=0x123"
        );
    }

    #[test]
    fn test_history_row_columns() {
        let row = history_row(&decode(Opcode::new(0x00EE)));
        assert_eq!(row, ["0xEE", "Return", "0x0", "0xE", "0xE", "0xEE", "0xEE"]);
    }
}
