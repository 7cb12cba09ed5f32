//! Integration tests for the CHIP-8 decoder

use chip8_pulse::{
    decode, decode_strict, decode_with, DecodeError, DecodeOptions, Mnemonic, Opcode,
    ZeroGroupPolicy,
};

fn mnemonic(op: u16) -> Mnemonic {
    decode(Opcode::new(op)).mnemonic
}

#[test]
fn test_fixed_groups_ignore_operands() {
    assert_eq!(mnemonic(0x1000), Mnemonic::Jump);
    assert_eq!(mnemonic(0x1FFF), Mnemonic::Jump);
    assert_eq!(mnemonic(0x2ABC), Mnemonic::Call);
    assert_eq!(mnemonic(0x3A42), Mnemonic::SkipIfEqualImmediate);
    assert_eq!(mnemonic(0x4A42), Mnemonic::SkipIfNotEqualImmediate);
    assert_eq!(mnemonic(0x5120), Mnemonic::SkipIfEqualRegister);
    assert_eq!(mnemonic(0x5123), Mnemonic::SkipIfEqualRegister);
    assert_eq!(mnemonic(0x6A42), Mnemonic::LoadImmediate);
    assert_eq!(mnemonic(0x7A01), Mnemonic::AddImmediate);
    assert_eq!(mnemonic(0x9120), Mnemonic::SkipIfNotEqualRegister);
    assert_eq!(mnemonic(0xA22A), Mnemonic::SetIndex);
    assert_eq!(mnemonic(0xB300), Mnemonic::JumpIndexed);
    assert_eq!(mnemonic(0xC0FF), Mnemonic::RandomMask);
    assert_eq!(mnemonic(0xDABF), Mnemonic::Draw);
}

#[test]
fn test_alu_group_by_low_nibble() {
    let expected = [
        (0x8120, Mnemonic::Assign),
        (0x8121, Mnemonic::Or),
        (0x8122, Mnemonic::And),
        (0x8123, Mnemonic::Xor),
        (0x8124, Mnemonic::AddRegister),
        (0x8125, Mnemonic::Subtract),
        (0x8126, Mnemonic::ShiftRight),
        (0x8127, Mnemonic::ReverseSubtract),
        (0x812E, Mnemonic::ShiftLeft),
    ];

    for (op, m) in expected {
        assert_eq!(mnemonic(op), m, "opcode {:04X}", op);
    }

    for n in [0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
        assert_eq!(mnemonic(0x8120 | n), Mnemonic::NoOperation);
    }
}

#[test]
fn test_key_group() {
    assert_eq!(mnemonic(0xE59E), Mnemonic::SkipIfKeyPressed);
    assert_eq!(mnemonic(0xE5A1), Mnemonic::SkipIfKeyNotPressed);
    assert_eq!(mnemonic(0xE500), Mnemonic::NoOperation);
}

#[test]
fn test_timer_and_memory_group_for_every_register() {
    for x in 0..=0xFu16 {
        let base = 0xF000 | (x << 8);
        assert_eq!(mnemonic(base | 0x07), Mnemonic::GetDelayTimer);
        assert_eq!(mnemonic(base | 0x0A), Mnemonic::AwaitKeyPress);
        assert_eq!(mnemonic(base | 0x15), Mnemonic::SetDelayTimer);
        assert_eq!(mnemonic(base | 0x18), Mnemonic::SetSoundTimer);
        assert_eq!(mnemonic(base | 0x1E), Mnemonic::AddToIndex);
        assert_eq!(mnemonic(base | 0x29), Mnemonic::SpriteIndex);
        assert_eq!(mnemonic(base | 0x33), Mnemonic::BinaryCodedDecimal);
        assert_eq!(mnemonic(base | 0x55), Mnemonic::StoreRegisters);
        assert_eq!(mnemonic(base | 0x65), Mnemonic::LoadRegisters);

        assert_eq!(decode(Opcode::new(base | 0x07)).x, x as u8);
    }

    assert_eq!(mnemonic(0xF000), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0xF019), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0xF075), Mnemonic::NoOperation);

    // The F group needs the exact low nibble, not just the third one
    assert_eq!(mnemonic(0xF02A), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0xF03F), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0xF051), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0xF060), Mnemonic::NoOperation);
}

#[test]
fn test_zero_group_policies() {
    let low_nibble = DecodeOptions {
        zero_group: ZeroGroupPolicy::LowNibble,
    };

    assert_eq!(mnemonic(0x00E0), Mnemonic::ClearScreen);
    assert_eq!(mnemonic(0x00EE), Mnemonic::Return);
    assert_eq!(mnemonic(0x0123), Mnemonic::NoOperation);
    assert_eq!(mnemonic(0x0000), Mnemonic::NoOperation);

    let with = |op: u16| decode_with(Opcode::new(op), low_nibble).mnemonic;
    assert_eq!(with(0x00E0), Mnemonic::ClearScreen);
    assert_eq!(with(0x00EE), Mnemonic::Return);
    assert_eq!(with(0x0120), Mnemonic::ClearScreen);
    assert_eq!(with(0x0123), Mnemonic::Return);
}

#[test]
fn test_return_fields() {
    let instr = decode(Opcode::new(0x00EE));

    assert_eq!(instr.mnemonic, Mnemonic::Return);
    assert_eq!(instr.x, 0x0);
    assert_eq!(instr.y, 0xE);
    assert_eq!(instr.n, 0xE);
    assert_eq!(instr.kk, 0xEE);
    assert_eq!(instr.addr, 0x0EE);
}

#[test]
fn test_fields_extracted_for_every_mnemonic() {
    let instr = decode(Opcode::new(0x1ABC));

    assert_eq!(instr.mnemonic, Mnemonic::Jump);
    assert_eq!(instr.x, 0xA);
    assert_eq!(instr.y, 0xB);
    assert_eq!(instr.n, 0xC);
    assert_eq!(instr.kk, 0xBC);
    assert_eq!(instr.addr, 0xABC);
}

#[test]
fn test_decode_strict() {
    assert_eq!(
        decode_strict(Opcode::new(0x6A42)).map(|i| i.mnemonic),
        Ok(Mnemonic::LoadImmediate)
    );
    assert_eq!(
        decode_strict(Opcode::new(0xFFFF)),
        Err(DecodeError::UnrecognizedOpcode(Opcode::new(0xFFFF)))
    );

    let message = decode_strict(Opcode::new(0x8008)).unwrap_err().to_string();
    assert!(message.contains("0x8008"), "{}", message);
}
