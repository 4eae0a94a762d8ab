/// number of keys on the COSMAC VIP hex keypad
pub const KEY_COUNT: usize = 16;

/// Current up/down state of the 16 hex keys. The host writes it before
/// stepping; the interpreter only reads it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: [false; KEY_COUNT],
        }
    }

    /// is key n down; only the low nibble of n is used
    pub fn is_pressed(&self, n: u8) -> bool {
        self.keys[(n & 0xf) as usize]
    }

    pub fn set(&mut self, n: u8, pressed: bool) {
        self.keys[(n & 0xf) as usize] = pressed;
    }

    /// lowest numbered key that is down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|n| n as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

/// Progress of an Fx0A instruction. It takes a key going down and then
/// coming back up, which spans many steps, so the machine carries this
/// between them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    /// no Fx0A in flight
    #[default]
    Idle,
    /// polling for any key to go down
    AwaitingPress { register: u8 },
    /// `key` went down; waiting for it to come back up
    AwaitingRelease { register: u8, key: u8 },
}

/// what the Fx0A instruction should do this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWaitOutcome {
    /// run the same instruction again next step
    Repeat,
    /// store `key` in `register`; the instruction is done
    Complete { register: u8, key: u8 },
}

impl KeyWait {
    /// Advance the state machine given the keys now down. `register` is
    /// remembered on the first poll and handed back on completion.
    pub fn poll(&mut self, register: u8, keypad: &Keypad) -> KeyWaitOutcome {
        match *self {
            KeyWait::Idle | KeyWait::AwaitingPress { .. } => {
                *self = match keypad.first_pressed() {
                    Some(key) => {
                        log::debug!("Fx0A: key {:x} down, waiting for release", key);
                        KeyWait::AwaitingRelease { register, key }
                    }
                    None => KeyWait::AwaitingPress { register },
                };
                KeyWaitOutcome::Repeat
            }
            KeyWait::AwaitingRelease { register, key } => {
                if keypad.is_pressed(key) {
                    KeyWaitOutcome::Repeat
                } else {
                    log::debug!("Fx0A: key {:x} released", key);
                    *self = KeyWait::Idle;
                    KeyWaitOutcome::Complete { register, key }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut k = Keypad::new();
        assert_eq!(k.first_pressed(), None);
        k.set(0xc, true);
        k.set(0x5, true);
        assert_eq!(k.first_pressed(), Some(0x5));
    }

    #[test]
    fn test_key_index_uses_low_nibble() {
        let mut k = Keypad::new();
        k.set(0x13, true);
        assert!(k.is_pressed(0x3));
    }

    #[test]
    fn test_wait_without_keys_repeats() {
        let mut w = KeyWait::Idle;
        let k = Keypad::new();
        for _ in 0..10 {
            assert_eq!(w.poll(2, &k), KeyWaitOutcome::Repeat);
        }
        assert_eq!(w, KeyWait::AwaitingPress { register: 2 });
    }

    #[test]
    fn test_wait_press_then_release() {
        let mut w = KeyWait::Idle;
        let mut k = Keypad::new();
        k.set(0xa, true);
        assert_eq!(w.poll(2, &k), KeyWaitOutcome::Repeat);
        assert_eq!(w, KeyWait::AwaitingRelease { register: 2, key: 0xa });
        // still held
        assert_eq!(w.poll(2, &k), KeyWaitOutcome::Repeat);
        k.set(0xa, false);
        assert_eq!(
            w.poll(2, &k),
            KeyWaitOutcome::Complete { register: 2, key: 0xa }
        );
        assert_eq!(w, KeyWait::Idle);
    }

    #[test]
    fn test_wait_completes_into_the_captured_register() {
        let mut w = KeyWait::Idle;
        let mut k = Keypad::new();
        k.set(0x4, true);
        w.poll(0x7, &k);
        k.set(0x4, false);
        // the register comes from the state, not from this call
        assert_eq!(
            w.poll(0x1, &k),
            KeyWaitOutcome::Complete { register: 0x7, key: 0x4 }
        );
    }

    #[test]
    fn test_wait_ignores_other_keys_while_held() {
        let mut w = KeyWait::Idle;
        let mut k = Keypad::new();
        k.set(0x3, true);
        w.poll(0, &k);
        k.set(0x1, true);
        assert_eq!(w.poll(0, &k), KeyWaitOutcome::Repeat);
        k.set(0x3, false);
        assert_eq!(
            w.poll(0, &k),
            KeyWaitOutcome::Complete { register: 0, key: 0x3 }
        );
    }
}
