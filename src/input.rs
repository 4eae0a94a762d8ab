use crate::keypad::{Keypad, KEY_COUNT};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// map the left-hand side of a qwerty keyboard onto the COSMAC hex pad
///   1 2 3 4      1 2 3 C
///   q w e r  =>  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00), // x
    ('1', 0x01), // 1
    ('2', 0x02), // 2
    ('3', 0x03), // 3
    ('q', 0x04), // q
    ('w', 0x05), // w
    ('e', 0x06), // e
    ('a', 0x07), // a
    ('s', 0x08), // s
    ('d', 0x09), // d
    ('z', 0x0a), // z
    ('c', 0x0b), // c
    ('4', 0x0c), // 4
    ('r', 0x0d), // r
    ('f', 0x0e), // f
    ('v', 0x0f), // v
];

/// what the host should do after reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    Quit,
}

/// reads keypresses into the machine's keypad, once per frame
pub trait Input {
    fn update(&mut self, keypad: &mut Keypad) -> Result<Command, io::Error>;
}

/// Keyboard input from the terminal via crossterm.
///
/// Terminals only report presses (and autorepeat), never releases, so a key
/// counts as held for `hold_frames` frames after the last event for it.
pub struct TermInput {
    keymap: HashMap<char, u8>,
    hold: [u8; KEY_COUNT],
    hold_frames: u8,
}

impl TermInput {
    pub fn new(hold_frames: u8) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            hold: [0; KEY_COUNT],
            hold_frames,
        })
    }

    fn read_events(&mut self) -> Result<Command, io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                }) if modifiers.contains(KeyModifiers::CONTROL) => return Ok(Command::Quit),
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.hold[*mapped_key as usize] = self.hold_frames,
                        None => log::warn!("can't map {:?} to a COSMAC key", key),
                    },
                    KeyCode::Esc => return Ok(Command::Quit),
                    _ => log::warn!("unknown key event received"),
                },
                Event::Resize(..) => {}
                _ => log::debug!("ignoring non-key event"),
            }
        }
        Ok(Command::Continue)
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for TermInput {
    fn update(&mut self, keypad: &mut Keypad) -> Result<Command, io::Error> {
        for frames in self.hold.iter_mut() {
            *frames = frames.saturating_sub(1);
        }
        let command = self.read_events()?;
        for (key, frames) in self.hold.iter().enumerate() {
            keypad.set(key as u8, *frames > 0);
        }
        Ok(command)
    }
}

/// dummy Input implementation for testing: holds down a fixed set of keys,
/// optionally asking to quit after some number of frames
pub struct DummyInput {
    keys: Vec<u8>,
    frames_left: Option<usize>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            keys: Vec::from(keys),
            frames_left: None,
        }
    }

    pub fn quit_after(mut self, frames: usize) -> Self {
        self.frames_left = Some(frames);
        self
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
    }
}

impl Input for DummyInput {
    fn update(&mut self, keypad: &mut Keypad) -> Result<Command, io::Error> {
        if let Some(frames) = self.frames_left.as_mut() {
            if *frames == 0 {
                return Ok(Command::Quit);
            }
            *frames -= 1;
        }
        keypad.release_all();
        for key in &self.keys {
            keypad.set(*key, true);
        }
        Ok(Command::Continue)
    }
}
