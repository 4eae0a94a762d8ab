use crate::memory::PROGRAM_ADDR;

/// index of the flag register VF
pub const FLAG: u8 = 0xf;

/// how many return addresses the call stack holds
pub const STACK_DEPTH: usize = 16;

/// V0-VF, the index register and the program counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; 16],
    pub i: u16,
    pub pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
        }
    }

    /// read Vn; only the low nibble of n is used
    pub fn get(&self, n: u8) -> u8 {
        self.v[(n & 0xf) as usize]
    }

    /// write Vn; only the low nibble of n is used
    pub fn set(&mut self, n: u8, value: u8) {
        self.v[(n & 0xf) as usize] = value;
    }

    /// overwrite VF
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG as usize] = flag as u8;
    }

    pub fn flag(&self) -> u8 {
        self.v[FLAG as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.v
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size stack of return addresses.
///
/// Conformant programs never nest deeper than [STACK_DEPTH]; if one does,
/// the pointer wraps rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    slots: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            slots: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) {
        if self.sp >= STACK_DEPTH {
            log::warn!("call stack overflow at depth {}; wrapping", self.sp);
            self.sp %= STACK_DEPTH;
        }
        self.slots[self.sp] = addr;
        self.sp += 1;
    }

    pub fn pop(&mut self) -> u16 {
        if self.sp == 0 {
            log::warn!("return with empty call stack; wrapping");
            self.sp = STACK_DEPTH;
        }
        self.sp -= 1;
        self.slots[self.sp]
    }

    /// stack pointer; number of live return addresses
    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
