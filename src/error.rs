use std::io;
use thiserror::Error;

/// Why a program could not be placed in memory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("program is {len} bytes but only {max} bytes are available")]
    TooLarge { len: usize, max: usize },
    #[error("failed to read program: {0}")]
    Io(#[from] io::Error),
}

/// Failures of the host front end (terminal, keyboard, speaker).
#[derive(Error, Debug)]
pub enum HostError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("sound error: {0}")]
    Sound(String),
}
