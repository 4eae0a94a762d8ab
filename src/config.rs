use clap::Parser;
use std::path::PathBuf;

/// instructions per second; fixed, like the original hardware's pace
pub const CLOCK_HZ: u32 = 600;

/// display refreshes and timer ticks per second
pub const FRAMES_PER_SECOND: u32 = 60;

pub const STEPS_PER_FRAME: u32 = CLOCK_HZ / FRAMES_PER_SECOND;

#[derive(Parser, Debug)]
#[command(name = "chip8-vm")]
#[command(about = "CHIP-8 interpreter for the terminal", long_about = None)]
pub struct Config {
    /// Path to a CHIP-8 program
    pub rom: PathBuf,

    /// Use the PC speaker for the sound timer instead of staying silent
    #[arg(long)]
    pub beep: bool,

    /// Stop after this many frames (runs until Esc by default)
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames a key stays down after the terminal reports it
    #[arg(long, default_value_t = 6)]
    pub key_hold: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_steps_per_frame() {
        assert_eq!(STEPS_PER_FRAME, 10);
    }

    #[test]
    fn test_parse_defaults() {
        let c = Config::try_parse_from(["chip8-vm", "roms/pong.ch8"]).unwrap();
        assert_eq!(c.rom, PathBuf::from("roms/pong.ch8"));
        assert!(!c.beep);
        assert_eq!(c.frames, None);
        assert_eq!(c.seed, None);
        assert_eq!(c.key_hold, 6);
    }

    #[test]
    fn test_parse_options() {
        let c = Config::try_parse_from([
            "chip8-vm", "--beep", "--frames", "120", "--seed", "7", "game.ch8",
        ])
        .unwrap();
        assert!(c.beep);
        assert_eq!(c.frames, Some(120));
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn test_missing_rom_is_an_error() {
        assert!(Config::try_parse_from(["chip8-vm"]).is_err());
    }
}
