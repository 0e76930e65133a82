/// Game: owns the field, the score banner, the level counter, and the
/// random source. Advances one discrete action at a time.
///
/// ## Phases
///
/// ```text
/// Splash ──begin──▶ Playing ──all mines defused──▶ LevelClear
///                     ▲  │                              │
///                     │  └──Quit──▶ Terminated          │
///                     └────────advance_level────────────┘
/// ```
///
/// Per action, in order: dispatch to the field, recompute proximity,
/// copy counters into the score, check for a cleared field.

use log::{debug, info};
use rand::rngs::StdRng;

use crate::domain::field::MineField;
use crate::domain::geom::{Dims, Direction};
use crate::error::{GameError, Result};
use super::event::GameEvent;
use super::score::Score;

/// Discrete input, decoded once at the terminal boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Move(Direction),
    Fire,
    ToggleReveal,
    /// Re-center the player and wipe the trail; same mines, same level.
    ResetPlayer,
    Quit,
    Noop,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Splash,
    Playing,
    LevelClear,
    Terminated,
}

pub struct Game {
    pub field: MineField,
    pub score: Score,
    pub level: u32,
    pub phase: Phase,
    rng: StdRng,
}

impl Game {
    pub fn new(dims: Dims, rng: StdRng) -> Result<Self> {
        if !dims.is_playable() {
            return Err(GameError::FieldTooSmall {
                width: dims.width,
                height: dims.height,
                min: Dims::MIN,
            });
        }
        Ok(Game {
            field: MineField::new(dims),
            score: Score::new(dims.area()),
            level: 0,
            phase: Phase::Splash,
            rng,
        })
    }

    /// Leave the splash screen and lay out level 0.
    pub fn begin(&mut self) {
        if self.phase != Phase::Splash {
            return;
        }
        self.new_level(0);
        self.phase = Phase::Playing;
    }

    pub fn handle(&mut self, action: Action) -> Vec<GameEvent> {
        if self.phase != Phase::Playing {
            return vec![];
        }

        let mut events = Vec::new();
        match action {
            Action::Move(dir) => {
                if self.field.move_player(dir) > 0 {
                    events.push(GameEvent::Moved);
                } else {
                    events.push(GameEvent::Blocked);
                }
            }
            Action::Fire => {
                let before = self.field.num_defused;
                self.field.fire();
                for _ in before..self.field.num_defused {
                    events.push(GameEvent::MineDefused);
                }
            }
            Action::ToggleReveal => {
                let shown = self.field.toggle_reveal();
                debug!("mines {}", if shown { "shown" } else { "hidden" });
                events.push(GameEvent::RevealToggled);
            }
            Action::ResetPlayer => {
                self.field.reset_player();
                events.push(GameEvent::PlayerReset);
            }
            Action::Quit => {
                info!("quit at level {} with {} banked", self.level, self.score.value);
                self.phase = Phase::Terminated;
                events.push(GameEvent::Quit);
                return events;
            }
            Action::Noop => {}
        }

        self.update();

        if self.field.is_cleared() {
            info!("level {} cleared, {} points pending", self.level, self.score.points);
            self.phase = Phase::LevelClear;
            events.push(GameEvent::FieldCleared { level: self.level });
        }

        events
    }

    /// Bank the cleared level and lay out the next one.
    pub fn advance_level(&mut self) {
        if self.phase != Phase::LevelClear {
            return;
        }
        self.new_level(self.level + 1);
        self.phase = Phase::Playing;
    }

    /// Banked score only; points of an unfinished level are forfeit.
    pub fn final_score(&self) -> u64 {
        self.score.value
    }

    fn update(&mut self) {
        self.field.update();
        let (defused, total) = self.field.status();
        self.score.record(self.field.player.steps, defused, total);
    }

    fn new_level(&mut self, level: u32) {
        self.level = level;
        self.field.reset();
        self.field.create(&mut self.rng);
        let (_, total) = self.field.status();
        self.score.new_level(level, total);
        self.field.update();
        info!("level {} laid out with {} mines, score {}", level, total, self.score.value);
    }
}
