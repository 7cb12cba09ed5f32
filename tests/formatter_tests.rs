//! Integration tests for instruction formatting

use chip8_pulse::disassembler::formatter::HISTORY_COLUMNS;
use chip8_pulse::{
    decode, format_descriptor, format_value, history_row, Base, FormatError, Opcode,
};

#[test]
fn test_format_value_bases() {
    assert_eq!(format_value(255, Base::Hexadecimal), "0xFF");
    assert_eq!(format_value(255, Base::Decimal), "255");
    assert_eq!(format_value(0x200, Base::default()), "0x200");
}

#[test]
fn test_radix_conversion() {
    assert_eq!(Base::try_from(10u32), Ok(Base::Decimal));
    assert_eq!(Base::try_from(16u32), Ok(Base::Hexadecimal));
    assert_eq!(Base::try_from(8u32), Err(FormatError::UnsupportedBase(8)));
}

#[test]
fn test_history_row_matches_columns() {
    let row = history_row(&decode(Opcode::new(0x6A42)));

    assert_eq!(row.len(), HISTORY_COLUMNS.len());
    assert_eq!(row, ["0x6A42", "Set Vx = KK", "0xA", "0x4", "0x2", "0x42", "0xA42"]);
}

#[test]
fn test_descriptor_in_decimal() {
    let line = format_descriptor(&decode(Opcode::new(0x7A01)), Base::Decimal);
    assert_eq!(line, "31233 Set Vx += KK x=10 y=0 n=1 kk=1 addr=2561");
}
