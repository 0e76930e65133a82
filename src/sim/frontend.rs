/// The display/input capability the session loop drives.
///
/// The terminal implementation lives in `ui::terminal`; tests script one.

use crate::error::Result;
use super::event::GameEvent;
use super::game::{Action, Game};

pub trait Frontend {
    /// Intro animation; returns after one key.
    fn splash(&mut self) -> Result<()>;

    /// Redraw banner, field, trail, and player from the current state.
    fn draw(&mut self, game: &Game) -> Result<()>;

    /// Block until the next discrete action.
    fn next_action(&mut self) -> Result<Action>;

    /// Side effects for one event (flash, sound).
    fn notify(&mut self, event: &GameEvent) -> Result<()>;

    /// Centered message; returns after one key.
    fn message_box(&mut self, msg: &str) -> Result<()>;
}
