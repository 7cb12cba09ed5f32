//! CHIP-8 Disassembler Module
//!
//! Converts opcodes into structured instruction descriptors and walks ROM
//! images word by word.

pub mod decoder;
pub mod formatter;

use crate::mnemonics::Mnemonic;
use crate::opcode::Opcode;

/// Address where CHIP-8 programs are loaded.
pub const PROGRAM_START: u16 = 0x200;

/// Decoded view of a single opcode.
///
/// All operand fields are extracted with fixed masks whatever the mnemonic,
/// so a `Goto ADDR` descriptor still reports `x`, `y`, `n` and `kk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionDescriptor {
    /// The word this descriptor was decoded from
    pub opcode: Opcode,

    /// Operation category
    pub mnemonic: Mnemonic,

    /// Second nibble, register `Vx`
    pub x: u8,

    /// Third nibble, register `Vy`
    pub y: u8,

    /// Fourth nibble, sprite height or sub-operation
    pub n: u8,

    /// Low byte immediate
    pub kk: u8,

    /// Low 12-bit address
    pub addr: u16,
}

impl InstructionDescriptor {
    /// Builds a descriptor for `opcode` with the given mnemonic.
    pub(crate) fn new(opcode: Opcode, mnemonic: Mnemonic) -> Self {
        Self {
            opcode,
            mnemonic,
            x: opcode.x(),
            y: opcode.y(),
            n: opcode.n(),
            kk: opcode.kk(),
            addr: opcode.addr(),
        }
    }

    /// Returns false when the opcode fell through to "No Operation".
    pub fn is_recognized(&self) -> bool {
        self.mnemonic.is_recognized()
    }

    /// The mnemonic's display label.
    pub fn label(&self) -> &'static str {
        self.mnemonic.label()
    }
}

/// How opcodes in the `0nnn` group are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroGroupPolicy {
    /// `00E0` clears the screen, `00EE` returns, every other `0nnn` is
    /// "No Operation".
    #[default]
    FullByte,

    /// Only the low nibble is inspected: zero clears the screen, anything
    /// else returns. Useful for comparing against listings made that way.
    LowNibble,
}

/// Options controlling decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    /// Rule used for the `0nnn` group
    pub zero_group: ZeroGroupPolicy,
}

/// A decoded word located in a ROM image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The decoded instruction
    pub descriptor: InstructionDescriptor,
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy)]
pub struct DisassemblyOptions {
    /// Address of the first byte (affects address display)
    pub start_address: u16,

    /// Decoder options applied to every word
    pub decode: DecodeOptions,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self {
            start_address: PROGRAM_START,
            decode: DecodeOptions::default(),
        }
    }
}

/// Result of walking a ROM image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Disassembly {
    /// One entry per complete 16-bit word
    pub instructions: Vec<Instruction>,

    /// Final byte of an odd-length image, which cannot form an opcode
    pub trailing_byte: Option<u8>,
}

/// Disassemble a ROM image into a sequence of instructions
///
/// Every complete big-endian word is decoded; unrecognised words appear as
/// "No Operation" rather than being skipped, so `instructions.len()` is
/// always `bytes.len() / 2`.
///
/// # Examples
///
/// ```
/// use chip8_pulse::{disassemble, DisassemblyOptions, Mnemonic};
///
/// let rom = [0x00, 0xE0, 0xA2, 0x2A];
/// let listing = disassemble(&rom, DisassemblyOptions::default());
///
/// assert_eq!(listing.instructions[0].descriptor.mnemonic, Mnemonic::ClearScreen);
/// assert_eq!(listing.instructions[1].address, 0x202);
/// assert_eq!(listing.instructions[1].descriptor.addr, 0x22A);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Disassembly {
    let mut words = bytes.chunks_exact(2);
    let mut address = options.start_address;
    let mut instructions = Vec::with_capacity(bytes.len() / 2);

    for word in &mut words {
        let opcode = Opcode::from_be_bytes(word[0], word[1]);
        instructions.push(Instruction {
            address,
            descriptor: decoder::decode_with(opcode, options.decode),
        });
        address = address.wrapping_add(2);
    }

    Disassembly {
        instructions,
        trailing_byte: words.remainder().first().copied(),
    }
}
