/// Terminal front end: renderer + keyboard + sound behind `Frontend`.
///
/// Opening a `Tui` puts the terminal in raw mode on the alternate screen.
/// Dropping it restores the terminal, so every exit path (normal return,
/// `?` error, or panic unwind) leaves the shell usable.

use log::{info, warn};

use crate::config::{DisplayConfig, GameConfig};
use crate::domain::geom::Dims;
use crate::error::{GameError, Result};
use crate::sim::event::GameEvent;
use crate::sim::frontend::Frontend;
use crate::sim::game::{Action, Game};
use super::input;
use super::renderer::{Renderer, RESERVED_COLS, RESERVED_ROWS};
use super::sound::SoundEngine;

pub struct Tui {
    renderer: Renderer,
    sound: Option<SoundEngine>,
    display: DisplayConfig,
    cols: u16,
    lines: u16,
}

impl Tui {
    pub fn open(config: &GameConfig) -> Result<Self> {
        let (cols, lines) = crossterm::terminal::size()?;
        let field = field_dims(cols, lines);
        if !field.is_playable() {
            return Err(GameError::TerminalTooSmall { cols, lines });
        }

        let sound = if config.sound.enabled { SoundEngine::new() } else { None };
        let mut tui = Tui {
            renderer: Renderer::new(),
            sound,
            display: config.display.clone(),
            cols,
            lines,
        };
        // From here on a failure drops `tui`, which restores the terminal.
        tui.renderer.init()?;
        info!("terminal {}x{}, field {}x{}", cols, lines, field.width, field.height);
        Ok(tui)
    }

    /// Field window size for the terminal measured at startup.
    pub fn field_dims(&self) -> Dims {
        field_dims(self.cols, self.lines)
    }
}

/// Everything but the outer border, banner, and help line.
pub fn field_dims(cols: u16, lines: u16) -> Dims {
    Dims::new(
        cols as i32 - RESERVED_COLS as i32,
        lines as i32 - RESERVED_ROWS as i32,
    )
}

impl Frontend for Tui {
    fn splash(&mut self) -> Result<()> {
        self.renderer.splash(self.display.splash_frame)?;
        input::wait_any_key()?;
        Ok(())
    }

    fn draw(&mut self, game: &Game) -> Result<()> {
        self.renderer.render(game)?;
        Ok(())
    }

    fn next_action(&mut self) -> Result<Action> {
        Ok(input::read_action()?)
    }

    fn notify(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::MineDefused => {
                if let Some(sfx) = &self.sound {
                    sfx.play_defuse();
                }
                self.renderer.flash(self.display.flash)?;
            }
            GameEvent::Blocked => {
                if let Some(sfx) = &self.sound {
                    sfx.play_bump();
                }
            }
            GameEvent::FieldCleared { level } => {
                info!("field clear on level {level}");
                if let Some(sfx) = &self.sound {
                    sfx.play_clear();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn message_box(&mut self, msg: &str) -> Result<()> {
        self.renderer.message_box(msg)?;
        input::wait_any_key()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.renderer.cleanup() {
            warn!("terminal cleanup failed: {e}");
        }
    }
}
