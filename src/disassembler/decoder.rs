//! Instruction decoder for the CHIP-8 disassembler

use crate::disassembler::{DecodeOptions, InstructionDescriptor, ZeroGroupPolicy};
use crate::mnemonics::Mnemonic;
use crate::opcode::Opcode;
use crate::DecodeError;

/// Decode a single opcode with the default options
///
/// Decoding is total: every 16-bit value produces a descriptor, with
/// reserved encodings mapped to [`Mnemonic::NoOperation`].
///
/// # Examples
///
/// ```
/// use chip8_pulse::{decode, Mnemonic, Opcode};
///
/// let instr = decode(Opcode::new(0x8014));
/// assert_eq!(instr.mnemonic, Mnemonic::AddRegister);
/// assert_eq!((instr.x, instr.y), (0x0, 0x1));
/// ```
pub fn decode(opcode: Opcode) -> InstructionDescriptor {
    decode_with(opcode, DecodeOptions::default())
}

/// Decode a single opcode using explicit options
pub fn decode_with(opcode: Opcode, options: DecodeOptions) -> InstructionDescriptor {
    InstructionDescriptor::new(opcode, mnemonic_for(opcode, options.zero_group))
}

/// Decode a single opcode, rejecting the "No Operation" fallback
///
/// Intended for tooling that wants to flag data words or unsupported
/// extensions inside a ROM. The scheduler never uses it.
///
/// # Returns
///
/// `Err(DecodeError::UnrecognizedOpcode)` when no catalog entry matches
pub fn decode_strict(opcode: Opcode) -> Result<InstructionDescriptor, DecodeError> {
    let descriptor = decode(opcode);
    if descriptor.is_recognized() {
        Ok(descriptor)
    } else {
        Err(DecodeError::UnrecognizedOpcode(opcode))
    }
}

/// Selects the catalog entry for an opcode.
fn mnemonic_for(opcode: Opcode, zero_group: ZeroGroupPolicy) -> Mnemonic {
    use Mnemonic::*;

    match opcode.nibbles() {
        (0x0, ..) => zero_group_mnemonic(opcode, zero_group),
        (0x1, ..) => Jump,
        (0x2, ..) => Call,
        (0x3, ..) => SkipIfEqualImmediate,
        (0x4, ..) => SkipIfNotEqualImmediate,
        (0x5, ..) => SkipIfEqualRegister,
        (0x6, ..) => LoadImmediate,
        (0x7, ..) => AddImmediate,
        (0x8, .., 0x0) => Assign,
        (0x8, .., 0x1) => Or,
        (0x8, .., 0x2) => And,
        (0x8, .., 0x3) => Xor,
        (0x8, .., 0x4) => AddRegister,
        (0x8, .., 0x5) => Subtract,
        (0x8, .., 0x6) => ShiftRight,
        (0x8, .., 0x7) => ReverseSubtract,
        (0x8, .., 0xE) => ShiftLeft,
        (0x9, ..) => SkipIfNotEqualRegister,
        (0xA, ..) => SetIndex,
        (0xB, ..) => JumpIndexed,
        (0xC, ..) => RandomMask,
        (0xD, ..) => Draw,
        (0xE, .., 0xE) => SkipIfKeyPressed,
        (0xE, .., 0x1) => SkipIfKeyNotPressed,
        (0xF, _, 0x0, 0x7) => GetDelayTimer,
        (0xF, _, 0x0, 0xA) => AwaitKeyPress,
        (0xF, _, 0x1, 0x5) => SetDelayTimer,
        (0xF, _, 0x1, 0x8) => SetSoundTimer,
        (0xF, _, 0x1, 0xE) => AddToIndex,
        (0xF, _, 0x2, 0x9) => SpriteIndex,
        (0xF, _, 0x3, 0x3) => BinaryCodedDecimal,
        (0xF, _, 0x5, 0x5) => StoreRegisters,
        (0xF, _, 0x6, 0x5) => LoadRegisters,
        _ => NoOperation,
    }
}

fn zero_group_mnemonic(opcode: Opcode, policy: ZeroGroupPolicy) -> Mnemonic {
    match policy {
        ZeroGroupPolicy::FullByte => match opcode.value() {
            0x00E0 => Mnemonic::ClearScreen,
            0x00EE => Mnemonic::Return,
            _ => Mnemonic::NoOperation,
        },
        ZeroGroupPolicy::LowNibble if opcode.n() == 0 => Mnemonic::ClearScreen,
        ZeroGroupPolicy::LowNibble => Mnemonic::Return,
    }
}
