/// # host
///
/// Drives a [Machine] in real time: everything the interpreter itself
/// doesn't know about (wallclock, keyboard, screen, speaker).
///
///   main loop
///    |-- input.update(keypad)         -- quit on Esc
///    |-- machine.step() x 10
///    |-- machine.tick_timers()
///    |-- sound on/off on sound timer edges
///    |-- display.draw(frame)
///    `-- sleep out the rest of the 1/60s
use crate::config::{FRAMES_PER_SECOND, STEPS_PER_FRAME};
use crate::display::Display;
use crate::error::HostError;
use crate::input::{Command, Input};
use crate::machine::Machine;
use crate::sound::Sound;
use std::time::{Duration, Instant};

pub struct Host<'a> {
    machine: Machine,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    beeping: bool,
    frame_time: Duration,
}

impl<'a> Host<'a> {
    pub fn new(
        machine: Machine,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
    ) -> Self {
        Host {
            machine,
            display,
            input,
            sound,
            beeping: false,
            frame_time: Duration::from_secs(1) / FRAMES_PER_SECOND,
        }
    }

    /// run frames until told to quit, or until `max_frames` have gone by;
    /// returns how many frames ran
    pub fn main_loop(&mut self, max_frames: Option<u64>) -> Result<u64, HostError> {
        let mut frames = 0;
        while max_frames.map_or(true, |max| frames < max) {
            let start = Instant::now();
            if self.run_frame()? == Command::Quit {
                log::info!("quit requested after {} frames", frames);
                break;
            }
            frames += 1;
            if let Some(remaining) = self.frame_time.checked_sub(start.elapsed()) {
                spin_sleep::sleep(remaining);
            }
        }
        self.silence()?;
        Ok(frames)
    }

    /// one 60Hz frame's worth of work, without the sleep
    pub fn run_frame(&mut self) -> Result<Command, HostError> {
        if self.input.update(self.machine.keypad_mut())? == Command::Quit {
            return Ok(Command::Quit);
        }
        for _ in 0..STEPS_PER_FRAME {
            self.machine.step();
        }
        self.machine.tick_timers();
        self.update_sound()?;
        self.display.draw(self.machine.frame())?;
        Ok(Command::Continue)
    }

    fn update_sound(&mut self) -> Result<(), HostError> {
        let active = self.machine.sound_active();
        if active && !self.beeping {
            self.sound
                .beep()
                .map_err(|e| HostError::Sound(e.to_string()))?;
        } else if !active && self.beeping {
            self.sound
                .stop()
                .map_err(|e| HostError::Sound(e.to_string()))?;
        }
        self.beeping = active;
        Ok(())
    }

    fn silence(&mut self) -> Result<(), HostError> {
        if self.beeping {
            self.sound
                .stop()
                .map_err(|e| HostError::Sound(e.to_string()))?;
            self.beeping = false;
        }
        Ok(())
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DummyDisplay;
    use crate::input::DummyInput;
    use std::error::Error;

    /// counts the edges it is given
    #[derive(Default)]
    struct CountingSound {
        beeps: usize,
        stops: usize,
    }

    impl Sound for CountingSound {
        fn beep(&mut self) -> Result<(), Box<dyn Error>> {
            self.beeps += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Box<dyn Error>> {
            self.stops += 1;
            Ok(())
        }
    }

    fn machine_with(program: &[u8]) -> Machine {
        let mut m = Machine::with_seed(0);
        m.load_program(program).unwrap();
        m
    }

    #[test]
    fn test_frame_runs_ten_steps_and_draws() -> Result<(), HostError> {
        // 7001 forever: V0 counts steps
        let program = [0x70, 0x01, 0x12, 0x00];
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(&[]);
        let mut sound = CountingSound::default();
        let mut host = Host::new(machine_with(&program), &mut display, &mut input, &mut sound);
        host.run_frame()?;
        assert_eq!(host.machine().registers().get(0), 5);
        drop(host);
        assert_eq!(display.frames_drawn, 1);
        Ok(())
    }

    #[test]
    fn test_main_loop_stops_after_max_frames() -> Result<(), HostError> {
        let program = [0x12, 0x00];
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(&[]);
        let mut sound = CountingSound::default();
        let mut host = Host::new(machine_with(&program), &mut display, &mut input, &mut sound);
        assert_eq!(host.main_loop(Some(3))?, 3);
        drop(host);
        assert_eq!(display.frames_drawn, 3);
        Ok(())
    }

    #[test]
    fn test_main_loop_stops_on_quit() -> Result<(), HostError> {
        let program = [0x12, 0x00];
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(&[]).quit_after(2);
        let mut sound = CountingSound::default();
        let mut host = Host::new(machine_with(&program), &mut display, &mut input, &mut sound);
        assert_eq!(host.main_loop(None)?, 2);
        Ok(())
    }

    #[test]
    fn test_keys_reach_the_machine() -> Result<(), HostError> {
        // F00A then spin; the key has to come up again before V0 is written
        let program = [0xf0, 0x0a, 0x12, 0x02];
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(&[0x9]);
        let mut sound = CountingSound::default();
        let mut host = Host::new(machine_with(&program), &mut display, &mut input, &mut sound);
        host.run_frame()?;
        assert_eq!(host.machine().registers().pc, 0x200);
        drop(host);

        input.release_all();
        let mut m = machine_with(&program);
        m.set_key(0x9, true);
        m.step();
        let mut host = Host::new(m, &mut display, &mut input, &mut sound);
        host.run_frame()?;
        assert_eq!(host.machine().registers().get(0), 0x9);
        assert_eq!(host.machine().registers().pc, 0x202);
        Ok(())
    }

    #[test]
    fn test_sound_follows_timer_edges() -> Result<(), HostError> {
        // sound timer = 2, then spin
        let program = [0x60, 0x02, 0xf0, 0x18, 0x12, 0x04];
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::new(&[]);
        let mut sound = CountingSound::default();
        let mut host = Host::new(machine_with(&program), &mut display, &mut input, &mut sound);
        // frame 1: set to 2, ticked to 1 -> on
        host.run_frame()?;
        // frame 2: ticked to 0 -> off
        host.run_frame()?;
        host.run_frame()?;
        drop(host);
        assert_eq!(sound.beeps, 1);
        assert_eq!(sound.stops, 1);
        Ok(())
    }
}
