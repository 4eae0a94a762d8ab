//! # chip8-vm
//!
//! A CHIP-8 interpreter, split the way the COSMAC VIP was: the interpreter
//! proper knows nothing about wallclock time, keyboards or screens, and the
//! host feeds it.
//!
//! ## Design
//!
//! * one instruction per [Machine::step]; the host decides how many make a
//!   frame (10, for 600 instructions a second)
//! * timers only move when the host calls [Machine::tick_timers] (60Hz)
//! * key state is sampled, not queued; the host writes it before stepping
//! * Fx0A keeps its progress in the machine and rewinds the PC until done,
//!   so a step never blocks
//! * display, input and sound are traits so the terminal front end can be
//!   swapped for anything else (or dummies, in tests)
//! * unknown instructions are no-ops; lots of ROMs depend on that
//!
//! ## Model
//!
//! ```text
//! Host
//!  |-- display, input, sound
//!  |-- Machine
//!  |    |-- memory (font, program)
//!  |    |-- registers, call stack, timers
//!  |    |-- frame buffer, keypad, key-wait state
//!  |    `-- decode -> execute
//!  `-- main loop (input, 10 steps, tick, sound, draw, sleep)
//! ```
//!
//! ```
//! use chip8_vm::Machine;
//!
//! let mut machine = Machine::with_seed(1);
//! machine.load_program(&[0x00, 0xe0]).unwrap(); // clear screen
//! machine.step();
//! assert_eq!(machine.registers().pc, 0x202);
//! ```
pub mod alu;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod screen;
pub mod sound;
pub mod timer;

pub use error::{HostError, LoadError};
pub use instruction::Instruction;
pub use machine::Machine;
