/// Errors that end a play session.
///
/// Nothing here is recoverable: the session loop propagates with `?`
/// and the binary reports the fault once the terminal is restored.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("field {width}x{height} is too small, need at least {min}x{min}")]
    FieldTooSmall { width: i32, height: i32, min: i32 },

    #[error("terminal {cols}x{lines} is too small to host a mine field")]
    TerminalTooSmall { cols: u16, lines: u16 },
}

pub type Result<T> = std::result::Result<T, GameError>;
