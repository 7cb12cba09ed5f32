//! # Mnemonic Catalog
//!
//! The fixed catalog of CHIP-8 operation categories that the decoder can
//! assign to an opcode. Each entry carries:
//!
//! - a display label, used in instruction history and tooling output
//! - the canonical encoding pattern (`8xy4`, `Fx07`, ...) where lower-case
//!   letters stand for operand nibbles and `_` for an ignored nibble
//!
//! `NoOperation` is the fallback for every word that matches no other entry,
//! which keeps decoding total.

use std::fmt;

/// One operation category of the CHIP-8 instruction set.
///
/// # Examples
///
/// ```
/// use chip8_pulse::Mnemonic;
///
/// assert_eq!(Mnemonic::AddRegister.label(), "Set Vx = Vx + Vy");
/// assert_eq!(Mnemonic::AddRegister.pattern(), "8xy4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mnemonic {
    ClearScreen,
    Return,
    Jump,
    Call,
    SkipIfEqualImmediate,
    SkipIfNotEqualImmediate,
    SkipIfEqualRegister,
    LoadImmediate,
    AddImmediate,
    Assign,
    Or,
    And,
    Xor,
    AddRegister,
    Subtract,
    ShiftRight,
    ReverseSubtract,
    ShiftLeft,
    SkipIfNotEqualRegister,
    SetIndex,
    JumpIndexed,
    RandomMask,
    Draw,
    SkipIfKeyPressed,
    SkipIfKeyNotPressed,
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddToIndex,
    SpriteIndex,
    BinaryCodedDecimal,
    StoreRegisters,
    LoadRegisters,
    /// Fallback for reserved or unrecognised encodings.
    NoOperation,
}

impl Mnemonic {
    /// Every catalog entry, in encoding order with the fallback last.
    pub const ALL: [Mnemonic; 35] = [
        Mnemonic::ClearScreen,
        Mnemonic::Return,
        Mnemonic::Jump,
        Mnemonic::Call,
        Mnemonic::SkipIfEqualImmediate,
        Mnemonic::SkipIfNotEqualImmediate,
        Mnemonic::SkipIfEqualRegister,
        Mnemonic::LoadImmediate,
        Mnemonic::AddImmediate,
        Mnemonic::Assign,
        Mnemonic::Or,
        Mnemonic::And,
        Mnemonic::Xor,
        Mnemonic::AddRegister,
        Mnemonic::Subtract,
        Mnemonic::ShiftRight,
        Mnemonic::ReverseSubtract,
        Mnemonic::ShiftLeft,
        Mnemonic::SkipIfNotEqualRegister,
        Mnemonic::SetIndex,
        Mnemonic::JumpIndexed,
        Mnemonic::RandomMask,
        Mnemonic::Draw,
        Mnemonic::SkipIfKeyPressed,
        Mnemonic::SkipIfKeyNotPressed,
        Mnemonic::GetDelayTimer,
        Mnemonic::AwaitKeyPress,
        Mnemonic::SetDelayTimer,
        Mnemonic::SetSoundTimer,
        Mnemonic::AddToIndex,
        Mnemonic::SpriteIndex,
        Mnemonic::BinaryCodedDecimal,
        Mnemonic::StoreRegisters,
        Mnemonic::LoadRegisters,
        Mnemonic::NoOperation,
    ];

    /// Human-readable label shown next to the opcode in instruction history.
    pub const fn label(self) -> &'static str {
        match self {
            Mnemonic::ClearScreen => "Clear Screen",
            Mnemonic::Return => "Return",
            Mnemonic::Jump => "Goto ADDR",
            Mnemonic::Call => "Call ADDR",
            Mnemonic::SkipIfEqualImmediate => "Skip If Vx == KK",
            Mnemonic::SkipIfNotEqualImmediate => "Skip If Vx != KK",
            Mnemonic::SkipIfEqualRegister => "Skip If Vx == Vy",
            Mnemonic::LoadImmediate => "Set Vx = KK",
            Mnemonic::AddImmediate => "Set Vx += KK",
            Mnemonic::Assign => "Set Vx = Vy",
            Mnemonic::Or => "Set Vx = Vx | Vy",
            Mnemonic::And => "Set Vx = Vx & Vy",
            Mnemonic::Xor => "Set Vx = Vx ^ Vy",
            Mnemonic::AddRegister => "Set Vx = Vx + Vy",
            Mnemonic::Subtract => "Set Vx = Vx - Vy",
            Mnemonic::ShiftRight => "Set Vx = Vx >> 1",
            Mnemonic::ReverseSubtract => "Set Vx = Vy - Vx",
            Mnemonic::ShiftLeft => "Set Vx = Vx << 1",
            Mnemonic::SkipIfNotEqualRegister => "Skip If Vx != Vy",
            Mnemonic::SetIndex => "Set I to ADDR",
            Mnemonic::JumpIndexed => "Jump to ADDR + V0",
            Mnemonic::RandomMask => "Set Vx = rand() & KK",
            Mnemonic::Draw => "Draw N at (Vx, Vy)",
            Mnemonic::SkipIfKeyPressed => "Skip if KeyPressed(Vx)",
            Mnemonic::SkipIfKeyNotPressed => "Skip if not KeyPressed(Vx)",
            Mnemonic::GetDelayTimer => "Set Vx = DelayTimer",
            Mnemonic::AwaitKeyPress => "Set Vx = Await KeyPress",
            Mnemonic::SetDelayTimer => "Set DelayTimer = Vx",
            Mnemonic::SetSoundTimer => "Set SoundTimer = Vx",
            Mnemonic::AddToIndex => "Set I = I + Vx",
            Mnemonic::SpriteIndex => "Set I = Sprite[vX]",
            Mnemonic::BinaryCodedDecimal => "Convert Vx to Binary",
            Mnemonic::StoreRegisters => "Store V0..X to Mem starting at I",
            Mnemonic::LoadRegisters => "Load V0..X from Mem starting at I",
            Mnemonic::NoOperation => "No Operation",
        }
    }

    /// Canonical encoding pattern for the operation.
    ///
    /// `NoOperation` has no encoding of its own and reports `"----"`.
    pub const fn pattern(self) -> &'static str {
        match self {
            Mnemonic::ClearScreen => "00E0",
            Mnemonic::Return => "00EE",
            Mnemonic::Jump => "1nnn",
            Mnemonic::Call => "2nnn",
            Mnemonic::SkipIfEqualImmediate => "3xkk",
            Mnemonic::SkipIfNotEqualImmediate => "4xkk",
            Mnemonic::SkipIfEqualRegister => "5xy_",
            Mnemonic::LoadImmediate => "6xkk",
            Mnemonic::AddImmediate => "7xkk",
            Mnemonic::Assign => "8xy0",
            Mnemonic::Or => "8xy1",
            Mnemonic::And => "8xy2",
            Mnemonic::Xor => "8xy3",
            Mnemonic::AddRegister => "8xy4",
            Mnemonic::Subtract => "8xy5",
            Mnemonic::ShiftRight => "8xy6",
            Mnemonic::ReverseSubtract => "8xy7",
            Mnemonic::ShiftLeft => "8xyE",
            Mnemonic::SkipIfNotEqualRegister => "9xy_",
            Mnemonic::SetIndex => "Annn",
            Mnemonic::JumpIndexed => "Bnnn",
            Mnemonic::RandomMask => "Cxkk",
            Mnemonic::Draw => "Dxyn",
            Mnemonic::SkipIfKeyPressed => "Ex_E",
            Mnemonic::SkipIfKeyNotPressed => "Ex_1",
            Mnemonic::GetDelayTimer => "Fx07",
            Mnemonic::AwaitKeyPress => "Fx0A",
            Mnemonic::SetDelayTimer => "Fx15",
            Mnemonic::SetSoundTimer => "Fx18",
            Mnemonic::AddToIndex => "Fx1E",
            Mnemonic::SpriteIndex => "Fx29",
            Mnemonic::BinaryCodedDecimal => "Fx33",
            Mnemonic::StoreRegisters => "Fx55",
            Mnemonic::LoadRegisters => "Fx65",
            Mnemonic::NoOperation => "----",
        }
    }

    /// Returns false only for the [`Mnemonic::NoOperation`] fallback.
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Mnemonic::NoOperation)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
