/// # machine
///
/// The whole of the CHIP-8 state, and the fetch/decode/execute loop over it.
///
///   memory      4K, font at 0x000, program at 0x200
///   V0-VF       8 bit general registers; VF doubles as the flag
///   I           16 bit index register
///   PC          16 bit program counter
///   stack       16 return addresses
///   timers      delay and sound, counted down by the host
///   screen      64x32 monochrome
///   keypad      16 keys, written by the host
///
/// Nothing in here blocks or fails. Fx0A "waits" by rewinding the PC so the
/// same instruction runs again next step, and the host keeps calling.
use crate::alu;
use crate::error::LoadError;
use crate::instruction::Instruction;
use crate::keypad::{KeyWait, KeyWaitOutcome, Keypad};
use crate::memory::{Chip8MemoryMap, MemoryMap, FONT_ADDR, FONT_GLYPH_BYTES};
use crate::registers::{CallStack, Registers};
use crate::screen::FrameBuffer;
use crate::timer::Timers;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

pub struct Machine {
    memory: Chip8MemoryMap,
    registers: Registers,
    stack: CallStack,
    timers: Timers,
    screen: FrameBuffer,
    keypad: Keypad,
    key_wait: KeyWait,
    rng: StdRng,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// a machine whose Cxkk sequence is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Machine {
            memory: Chip8MemoryMap::new(),
            registers: Registers::new(),
            stack: CallStack::new(),
            timers: Timers::new(),
            screen: FrameBuffer::new(),
            keypad: Keypad::new(),
            key_wait: KeyWait::Idle,
            rng,
        }
    }

    /// load a chip8 program at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load_program(program)
    }

    /// load a chip8 program from a file or whatever
    pub fn load_from(&mut self, reader: &mut impl io::Read) -> Result<(), LoadError> {
        self.memory.load_from(reader)
    }

    /// fetch, decode and execute one instruction
    pub fn step(&mut self) {
        let pc = self.registers.pc;
        let word = self.memory.get_word(pc);
        let instruction = Instruction::decode(word);
        log::trace!("{:#06x}: {:04x} {:?}", pc, word, instruction);
        self.registers.pc = pc.wrapping_add(2);
        self.execute(instruction);
    }

    /// 60Hz timer interrupt
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Apply one instruction. PC must already point past it, as it does
    /// during [Machine::step].
    pub fn execute(&mut self, instruction: Instruction) {
        use Instruction::*;

        match instruction {
            ClearScreen => self.screen.clear(),
            Return => self.registers.pc = self.stack.pop(),
            Jump(nnn) => self.registers.pc = nnn,
            Call(nnn) => {
                self.stack.push(self.registers.pc);
                self.registers.pc = nnn;
            }
            SkipEqImm { x, kk } => self.skip_if(self.v(x) == kk),
            SkipNeImm { x, kk } => self.skip_if(self.v(x) != kk),
            SkipEqReg { x, y } => self.skip_if(self.v(x) == self.v(y)),
            LoadImm { x, kk } => self.registers.set(x, kk),
            AddImm { x, kk } => self.registers.set(x, self.v(x).wrapping_add(kk)),
            Copy { x, y } => self.registers.set(x, self.v(y)),
            Or { x, y } => self.registers.set(x, self.v(x) | self.v(y)),
            And { x, y } => self.registers.set(x, self.v(x) & self.v(y)),
            Xor { x, y } => self.registers.set(x, self.v(x) ^ self.v(y)),
            AddReg { x, y } => {
                // the sum is taken before VF changes
                let sum = alu::add(self.v(x), self.v(y));
                self.flag_then_result(x, |_| sum);
            }
            Sub { x, y } => self.flag_then_result(x, |r| alu::sub(r.get(x), r.get(y))),
            ShiftRight { x } => self.flag_then_result(x, |r| alu::shr(r.get(x))),
            SubReversed { x, y } => self.flag_then_result(x, |r| alu::subn(r.get(x), r.get(y))),
            ShiftLeft { x } => self.flag_then_result(x, |r| alu::shl(r.get(x))),
            SkipNeReg { x, y } => self.skip_if(self.v(x) != self.v(y)),
            SetIndex(nnn) => self.registers.i = nnn,
            JumpOffset(nnn) => self.registers.pc = nnn.wrapping_add(self.v(0) as u16),
            Random { x, kk } => {
                let byte: u8 = self.rng.gen();
                self.registers.set(x, byte & kk);
            }
            Draw { x, y, n } => self.draw(x, y, n),
            SkipKeyPressed { x } => self.skip_if(self.keypad.is_pressed(self.v(x))),
            SkipKeyNotPressed { x } => self.skip_if(!self.keypad.is_pressed(self.v(x))),
            ReadDelay { x } => self.registers.set(x, self.timers.delay),
            WaitKey { x } => match self.key_wait.poll(x, &self.keypad) {
                KeyWaitOutcome::Repeat => self.registers.pc = self.registers.pc.wrapping_sub(2),
                KeyWaitOutcome::Complete { register, key } => self.registers.set(register, key),
            },
            SetDelay { x } => self.timers.delay = self.v(x),
            SetSound { x } => self.timers.sound = self.v(x),
            AddIndex { x } => self.registers.i = self.registers.i.wrapping_add(self.v(x) as u16),
            FontChar { x } => {
                self.registers.i = FONT_ADDR + self.v(x) as u16 * FONT_GLYPH_BYTES;
            }
            StoreBcd { x } => {
                let value = self.v(x);
                let i = self.registers.i;
                self.memory.write(i, value / 100);
                self.memory.write(i.wrapping_add(1), (value % 100) / 10);
                self.memory.write(i.wrapping_add(2), value % 10);
            }
            DumpRegisters { x } => {
                for r in 0..=x {
                    let addr = self.registers.i.wrapping_add(r as u16);
                    self.memory.write(addr, self.v(r));
                }
            }
            LoadRegisters { x } => {
                for r in 0..=x {
                    let addr = self.registers.i.wrapping_add(r as u16);
                    self.registers.set(r, self.memory.read(addr));
                }
            }
            Unknown(word) => log::trace!("ignoring unknown instruction {:04x}", word),
        }
    }

    fn v(&self, n: u8) -> u8 {
        self.registers.get(n)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.pc = self.registers.pc.wrapping_add(2);
        }
    }

    /// VF is written first, then Vx is worked out again from the registers
    /// as they now stand; an operand in VF sees the new flag
    fn flag_then_result(&mut self, x: u8, op: impl Fn(&Registers) -> (u8, bool)) {
        let (_, flag) = op(&self.registers);
        self.registers.set_flag(flag);
        let (result, _) = op(&self.registers);
        self.registers.set(x, result);
    }

    fn draw(&mut self, x: u8, y: u8, n: u8) {
        // VF is cleared before the coordinates are read
        self.registers.set_flag(false);
        let (start_x, start_y) = (self.v(x), self.v(y));
        let mut rows = [0u8; 16];
        for (row, byte) in rows.iter_mut().enumerate().take(n as usize) {
            *byte = self.memory.read(self.registers.i.wrapping_add(row as u16));
        }
        let collision = self.screen.blit(start_x, start_y, &rows[..n as usize]);
        self.registers.set_flag(collision);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.screen
    }

    /// the host writes key state through here before stepping
    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Chip8MemoryMap {
        &mut self.memory
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn key_wait(&self) -> KeyWait {
        self.key_wait
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
