//! # CHIP-8 Opcodes
//!
//! A CHIP-8 instruction is a single big-endian 16-bit word. Its meaning is
//! selected by some combination of its four nibbles, and the nibbles that do
//! not select the operation usually carry operands:
//!
//! - `(n, _, _, _)` broad category; every instruction dispatches on it
//! - `(_, _, _, n)` specific operation within the `8`, `E` and `F` groups
//! - `(_, n, n, n)` a 12-bit address (`addr`)
//! - `(_, _, n, n)` an 8-bit immediate (`kk`)
//! - `(_, n, _, _)` register `Vx`, or the range `V0..=Vx`
//! - `(_, _, n, _)` register `Vy`

use std::fmt;

/// A raw 16-bit CHIP-8 instruction word as produced by an [`Engine`](crate::Engine).
///
/// Field accessors apply fixed masks and never look at the operation, so
/// every opcode has an `x`, `y`, `n`, `kk` and `addr` whether or not the
/// instruction uses them.
///
/// # Examples
///
/// ```
/// use chip8_pulse::Opcode;
///
/// let op = Opcode::new(0xD123);
/// assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0x3));
/// assert_eq!(op.kk(), 0x23);
/// assert_eq!(op.addr(), 0x123);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Opcode(u16);

impl Opcode {
    /// Wraps a raw instruction word.
    pub const fn new(value: u16) -> Self {
        Opcode(value)
    }

    /// Builds an opcode from the two bytes stored at consecutive addresses.
    pub const fn from_be_bytes(high: u8, low: u8) -> Self {
        Opcode(((high as u16) << 8) | low as u16)
    }

    /// Returns the raw instruction word.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns the four nibbles, most significant first.
    pub const fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 & 0xF000) >> 12) as u8,
            self.x(),
            self.y(),
            self.n(),
        )
    }

    /// The second nibble. `[_x__]`
    pub const fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The third nibble. `[__y_]`
    pub const fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The fourth nibble. `[___n]`
    pub const fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The least significant byte. `[__kk]`
    pub const fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The word without its most significant nibble. `[_nnn]`
    pub const fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> Self {
        op.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl fmt::UpperHex for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op = Opcode::new(0xABCD);
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode::new(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode::new(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode::new(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_kk() {
        assert_eq!(Opcode::new(0xABCD).kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        assert_eq!(Opcode::new(0xABCD).addr(), 0x0BCD);
    }

    #[test]
    fn test_from_be_bytes() {
        assert_eq!(Opcode::from_be_bytes(0x00, 0xE0), Opcode::new(0x00E0));
        assert_eq!(Opcode::from_be_bytes(0xAA, 0xBB).value(), 0xAABB);
    }

    #[test]
    fn test_display_pads_to_four_digits() {
        assert_eq!(Opcode::new(0x00EE).to_string(), "0x00EE");
        assert_eq!(format!("{:X}", Opcode::new(0x00EE)), "EE");
    }
}
