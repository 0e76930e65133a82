/// Logger setup.
///
/// The game owns the terminal, so log lines only ever go to the file
/// named in `mines.toml`. Without one, `RUST_LOG` still filters but the
/// output is discarded; set `[log] file` to keep it.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::LogConfig;

pub fn init(cfg: &LogConfig) {
    let default_filter = if cfg.file.is_some() { cfg.level.as_str() } else { "off" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    match log_sink(cfg.file.as_deref()) {
        Ok(out) => {
            builder.target(Target::Pipe(out));
        }
        Err(e) => {
            if let Some(path) = &cfg.file {
                eprintln!("Warning: could not open log file {}: {e}", path.display());
            }
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.format_timestamp_millis();

    // A second init (tests, embedding) is harmless.
    let _ = builder.try_init();
}

/// Append to `file`, or swallow everything when none is configured.
/// Never stderr: it shares the alternate screen with the game.
fn log_sink(file: Option<&Path>) -> io::Result<Box<dyn Write + Send>> {
    match file {
        Some(path) => {
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(Box::new(f))
        }
        None => Ok(Box::new(io::sink())),
    }
}
