use crate::error::LoadError;
use std::io;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// where the hex digit glyphs live
pub const FONT_ADDR: u16 = 0x0000;

/// bytes per glyph in the font table
pub const FONT_GLYPH_BYTES: u16 = 5;

/// largest program that fits between PROGRAM_ADDR and the top of RAM
pub const MAX_PROGRAM_BYTES: usize = RAM_SIZE_BYTES - PROGRAM_ADDR as usize;

const ADDR_MASK: u16 = (RAM_SIZE_BYTES - 1) as u16;

/// Represents the addressable memory of the machine.
///
/// Every address is wrapped modulo the size of memory, so no access can
/// fall off the end; conformant programs never notice.
pub trait MemoryMap {
    /// read a single byte
    fn read(&self, addr: u16) -> u8;

    /// write a single byte
    fn write(&mut self, addr: u16, value: u8);

    /// get a two-byte big-endian word (instruction fetch)
    fn get_word(&self, addr: u16) -> u16 {
        ((self.read(addr) as u16) << 8) | self.read(addr.wrapping_add(1)) as u16
    }

    /// write a chunk of bytes starting at addr
    fn write_slice(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }
}

/// The CHIP-8 4K memory map
///   0x0000-0x004f  font glyphs (16 x 5 bytes)
///   0x0050-0x01ff  reserved for the interpreter
///   0x0200-0x0fff  program
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8MemoryMap {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[wrap(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[wrap(addr)] = value;
    }
}

fn wrap(addr: u16) -> usize {
    if addr > ADDR_MASK {
        log::trace!("address {:#06x} wrapped to {:#06x}", addr, addr & ADDR_MASK);
    }
    (addr & ADDR_MASK) as usize
}

impl Chip8MemoryMap {
    /// zeroed memory with the font installed
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mm.write_slice(&CHIP8_FONT, FONT_ADDR);
        mm
    }

    /// load a CHIP-8 program at 0x200; nothing is written if it doesn't fit
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_BYTES {
            return Err(LoadError::TooLarge {
                len: program.len(),
                max: MAX_PROGRAM_BYTES,
            });
        }
        self.write_slice(program, PROGRAM_ADDR);
        log::debug!("loaded {} byte program at {:#06x}", program.len(), PROGRAM_ADDR);
        Ok(())
    }

    /// read a program of unknown length from somewhere and load it
    pub fn load_from(&mut self, reader: &mut impl io::Read) -> Result<(), LoadError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.load_program(&buf)
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
