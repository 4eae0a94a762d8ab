use std::error::Error;
use std::fs::File;
use std::process;

use chip8_vm::config::Config;
use chip8_vm::display::MonoTermDisplay;
use chip8_vm::host::Host;
use chip8_vm::input::TermInput;
use chip8_vm::sound::{Mute, SimpleBeep, Sound};
use chip8_vm::{LoadError, Machine};
use clap::Parser;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    // clap prints usage and exits non-zero if the rom is missing
    let config = Config::parse();

    let mut machine = match config.seed {
        Some(seed) => Machine::with_seed(seed),
        None => Machine::new(),
    };

    // load a program before touching the terminal so errors print cleanly
    let loaded = File::open(&config.rom)
        .map_err(LoadError::from)
        .and_then(|mut f| machine.load_from(&mut f));
    if let Err(e) = loaded {
        eprintln!("Failed to load ROM {}: {}", config.rom.display(), e);
        process::exit(1);
    }
    log::info!("loaded {}", config.rom.display());

    let mut display = MonoTermDisplay::new()?;
    let mut input = TermInput::new(config.key_hold)?;
    let mut sound: Box<dyn Sound> = if config.beep {
        Box::new(SimpleBeep::new())
    } else {
        Box::new(Mute::new())
    };

    let mut host = Host::new(machine, &mut display, &mut input, sound.as_mut());
    let frames = host.main_loop(config.frames)?;
    log::info!("ran {} frames", frames);
    drop(host);
    drop(input);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
