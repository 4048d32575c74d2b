use std::ops::Range;

use crate::constants::{FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};
use crate::opcode;

// NB. addresses arrive as usize so callers can add offsets to I without
//     wrapping; anything past the end is reported rather than masked

/// # Memory
/// 4096 bytes of flat, byte-addressed memory.
///
/// ```text
/// 0x000-0x04F  unused
/// 0x050-0x09F  font sprites (16 glyphs x 5 bytes)
/// 0x0A0-0x1FF  unused
/// 0x200-0xFFF  program
/// ```
///
/// Every access is bounds checked; nothing is written unless the whole range fits.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font preloaded
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = usize::from(FONT_START);
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copy a program into memory at `PROGRAM_START`.
    /// No header is expected or validated.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let max = MEMORY_SIZE - usize::from(PROGRAM_START);
        if program.len() > max {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max,
            });
        }
        self.slice_mut(usize::from(PROGRAM_START), program.len())?
            .copy_from_slice(program);
        Ok(())
    }

    /// Read the instruction at `address` and `address + 1`
    pub fn fetch(&self, address: u16) -> Result<u16> {
        let word = self.slice(usize::from(address), 2)?;
        Ok(opcode::from_bytes(word[0], word[1]))
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        Ok(self.slice(address, 1)?[0])
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        self.slice_mut(address, 1)?[0] = value;
        Ok(())
    }

    /// A read-only view of `len` bytes starting at `address`
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        let range = Self::range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// A writable view of `len` bytes starting at `address`
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(address, len)?;
        Ok(&mut self.bytes[range])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn range(address: usize, len: usize) -> Result<Range<usize>> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(address..end),
            _ => Err(Chip8Error::OutOfBounds {
                address: address.max(MEMORY_SIZE),
            }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_outside_font() {
        let m = Memory::new();
        assert_eq!(m.as_bytes()[..0x50], [0; 0x50]);
        assert_eq!(m.as_bytes()[0xA0..], [0; 0xF60]);
    }

    #[test]
    fn test_font_glyphs_are_five_bytes_apart() {
        let m = Memory::new();
        // glyph 0xA
        assert_eq!(
            m.slice(0x50 + 5 * 0xA, 5).unwrap(),
            &[0xF0, 0x90, 0xF0, 0x90, 0x90]
        );
    }

    #[test]
    fn test_program_load_ok() {
        let mut m = Memory::new();
        m.load_program(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(m.slice(0x200, 4).unwrap(), &[0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_program_filling_memory_loads() {
        let mut m = Memory::new();
        m.load_program(&[0xAA; 0xE00]).unwrap();
        assert_eq!(m.read(0xFFF).unwrap(), 0xAA);
    }

    #[test]
    fn test_program_too_large_is_rejected() {
        let mut m = Memory::new();
        let err = m.load_program(&[0; 0xE01]).unwrap_err();
        assert_eq!(
            err,
            Chip8Error::ProgramTooLarge {
                size: 0xE01,
                max: 0xE00
            }
        );
        assert_eq!(m, Memory::new());
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut m = Memory::new();
        m.load_program(&[0x12, 0x4E]).unwrap();
        assert_eq!(m.fetch(0x200).unwrap(), 0x124E);
    }

    #[test]
    fn test_fetch_straddling_end_fails() {
        let m = Memory::new();
        assert_eq!(
            m.fetch(0xFFF),
            Err(Chip8Error::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_read_write() {
        let mut m = Memory::new();
        m.write(0x300, 0x42).unwrap();
        assert_eq!(m.read(0x300).unwrap(), 0x42);
    }

    #[test]
    fn test_write_past_end_fails() {
        let mut m = Memory::new();
        assert_eq!(
            m.write(0x1000, 1),
            Err(Chip8Error::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_slice_past_end_writes_nothing() {
        let mut m = Memory::new();
        assert!(m.slice_mut(0xFFE, 3).is_err());
        assert_eq!(m, Memory::new());
    }

    #[test]
    fn test_slice_overflowing_usize_fails() {
        let m = Memory::new();
        assert!(m.slice(usize::MAX, 2).is_err());
    }
}
