//! Property-based tests for decoder invariants.
//!
//! These tests verify that decoding is total and deterministic and that the
//! operand fields are always the fixed bit slices of the opcode.

use chip8_pulse::{decode, decode_strict, decode_with, DecodeOptions, Mnemonic, Opcode, ZeroGroupPolicy};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_fields_are_fixed_masks(op in any::<u16>()) {
        let instr = decode(Opcode::new(op));

        prop_assert_eq!(instr.opcode.value(), op);
        prop_assert_eq!(u16::from(instr.x), (op >> 8) & 0xF);
        prop_assert_eq!(u16::from(instr.y), (op >> 4) & 0xF);
        prop_assert_eq!(u16::from(instr.n), op & 0xF);
        prop_assert_eq!(u16::from(instr.kk), op & 0xFF);
        prop_assert_eq!(instr.addr, op & 0xFFF);
    }

    #[test]
    fn prop_decode_is_deterministic(op in any::<u16>()) {
        prop_assert_eq!(decode(Opcode::new(op)), decode(Opcode::new(op)));
    }

    #[test]
    fn prop_mnemonic_is_in_catalog(op in any::<u16>()) {
        let instr = decode(Opcode::new(op));
        prop_assert!(Mnemonic::ALL.contains(&instr.mnemonic));
    }

    #[test]
    fn prop_strict_agrees_with_lenient(op in any::<u16>()) {
        let lenient = decode(Opcode::new(op));

        match decode_strict(Opcode::new(op)) {
            Ok(strict) => prop_assert_eq!(strict, lenient),
            Err(_) => prop_assert_eq!(lenient.mnemonic, Mnemonic::NoOperation),
        }
    }

    #[test]
    fn prop_policy_only_affects_zero_group(op in 0x1000u16..=0xFFFF) {
        let low_nibble = DecodeOptions { zero_group: ZeroGroupPolicy::LowNibble };
        prop_assert_eq!(
            decode(Opcode::new(op)),
            decode_with(Opcode::new(op), low_nibble)
        );
    }

    #[test]
    fn prop_low_nibble_policy_never_yields_noop(op in 0x0000u16..=0x0FFF) {
        let low_nibble = DecodeOptions { zero_group: ZeroGroupPolicy::LowNibble };
        prop_assert!(decode_with(Opcode::new(op), low_nibble).is_recognized());
    }
}

#[test]
fn test_every_opcode_decodes() {
    let recognized = (0..=u16::MAX)
        .filter(|&op| decode(Opcode::new(op)).is_recognized())
        .count();

    // 00E0 and 00EE, twelve operand-only groups, nine ALU and two key forms
    // per (x, y) pair, nine F forms per register
    let expected = 2 + 12 * 4096 + 9 * 256 + 2 * 256 + 9 * 16;
    assert_eq!(recognized, expected);
}
