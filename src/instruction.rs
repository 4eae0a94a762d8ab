/// # instruction set
///
/// Every instruction is one big-endian 16 bit word. The fields are always
/// in the same place, so they're pulled out once and the opcode nibbles
/// pick which of them matter:
///
///   nnn  0x0fff  address
///   n    0x000f  nibble (sprite height)
///   x    0x0f00  register
///   y    0x00f0  register
///   kk   0x00ff  immediate byte
///
/// Anything not listed here decodes to `Unknown` and runs as a no-op;
/// plenty of test ROMs lean on 0nnn (machine code calls) being harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadImm { x: u8, kk: u8 },
    /// 7xkk
    AddImm { x: u8, kk: u8 },
    /// 8xy0
    Copy { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8 },
    /// 8xy7
    SubReversed { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    SetIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipKeyPressed { x: u8 },
    /// ExA1
    SkipKeyNotPressed { x: u8 },
    /// Fx07
    ReadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    FontChar { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    DumpRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
    /// anything else
    Unknown(u16),
}

impl Instruction {
    /// decode a 16 bit word; never fails
    pub fn decode(word: u16) -> Instruction {
        use Instruction::*;

        let nnn = word & 0x0fff;
        let n = (word & 0x000f) as u8;
        let x = ((word >> 8) & 0x0f) as u8;
        let y = ((word >> 4) & 0x0f) as u8;
        let kk = (word & 0x00ff) as u8;

        match (word >> 12, x, y, n) {
            (0x0, 0x0, 0xe, 0x0) => ClearScreen,
            (0x0, 0x0, 0xe, 0xe) => Return,
            (0x1, _, _, _) => Jump(nnn),
            (0x2, _, _, _) => Call(nnn),
            (0x3, _, _, _) => SkipEqImm { x, kk },
            (0x4, _, _, _) => SkipNeImm { x, kk },
            (0x5, _, _, 0x0) => SkipEqReg { x, y },
            (0x6, _, _, _) => LoadImm { x, kk },
            (0x7, _, _, _) => AddImm { x, kk },
            (0x8, _, _, 0x0) => Copy { x, y },
            (0x8, _, _, 0x1) => Or { x, y },
            (0x8, _, _, 0x2) => And { x, y },
            (0x8, _, _, 0x3) => Xor { x, y },
            (0x8, _, _, 0x4) => AddReg { x, y },
            (0x8, _, _, 0x5) => Sub { x, y },
            (0x8, _, _, 0x6) => ShiftRight { x },
            (0x8, _, _, 0x7) => SubReversed { x, y },
            (0x8, _, _, 0xe) => ShiftLeft { x },
            (0x9, _, _, 0x0) => SkipNeReg { x, y },
            (0xa, _, _, _) => SetIndex(nnn),
            (0xb, _, _, _) => JumpOffset(nnn),
            (0xc, _, _, _) => Random { x, kk },
            (0xd, _, _, _) => Draw { x, y, n },
            (0xe, _, 0x9, 0xe) => SkipKeyPressed { x },
            (0xe, _, 0xa, 0x1) => SkipKeyNotPressed { x },
            (0xf, _, 0x0, 0x7) => ReadDelay { x },
            (0xf, _, 0x0, 0xa) => WaitKey { x },
            (0xf, _, 0x1, 0x5) => SetDelay { x },
            (0xf, _, 0x1, 0x8) => SetSound { x },
            (0xf, _, 0x1, 0xe) => AddIndex { x },
            (0xf, _, 0x2, 0x9) => FontChar { x },
            (0xf, _, 0x3, 0x3) => StoreBcd { x },
            (0xf, _, 0x5, 0x5) => DumpRegisters { x },
            (0xf, _, 0x6, 0x5) => LoadRegisters { x },
            _ => Unknown(word),
        }
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Instruction::decode(word)
    }
}
