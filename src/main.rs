/// Entry point: run one session, restore the terminal, report the score.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

use anyhow::Context;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::GameConfig;
use sim::game::Game;
use sim::session;
use ui::terminal::Tui;

/// Panic message and backtrace, held until the terminal is back to normal.
static PANIC_REPORT: Mutex<Option<String>> = Mutex::new(None);

fn main() {
    let config = GameConfig::load();
    logging::init(&config.log);
    install_panic_hook();

    match panic::catch_unwind(AssertUnwindSafe(|| play(&config))) {
        Ok(Ok(score)) => {
            info!("session over, final score {score}");
            println!("Thanks for playing, your score was: {score}");
        }
        Ok(Err(e)) => {
            error!("session failed: {e:#}");
            println!("Caught exception: {e:#}");
            println!("{e:?}");
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            println!("Caught exception: {msg}");
            if let Some(report) = PANIC_REPORT.lock().ok().and_then(|mut r| r.take()) {
                println!("{report}");
            }
        }
    }
}

/// The terminal guard lives inside this frame, so it is restored before
/// `main` prints anything, whichever way this returns.
fn play(config: &GameConfig) -> anyhow::Result<u64> {
    let mut tui = Tui::open(config).context("opening the terminal")?;
    let mut game = Game::new(tui.field_dims(), StdRng::from_entropy())
        .context("laying out the mine field")?;
    let score = session::run(&mut game, &mut tui).context("while playing")?;
    Ok(score)
}

/// Keep panic output off the raw-mode screen; record it for later.
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let report = format!("{info}\n{}", Backtrace::force_capture());
        error!("panic: {report}");
        if let Ok(mut slot) = PANIC_REPORT.lock() {
            *slot = Some(report);
        }
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
