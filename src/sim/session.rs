/// Session loop: splash, then one blocking action per iteration until quit.

use log::debug;

use crate::error::Result;
use super::frontend::Frontend;
use super::game::{Game, Phase};

pub const CLEAR_MESSAGE: &str = "Field Clear";

/// Play until the player quits. Returns the banked score.
pub fn run<F: Frontend>(game: &mut Game, ui: &mut F) -> Result<u64> {
    ui.splash()?;
    game.begin();

    while game.phase != Phase::Terminated {
        ui.draw(game)?;

        let action = ui.next_action()?;
        debug!("action {:?}", action);
        for event in game.handle(action) {
            ui.notify(&event)?;
        }

        if game.phase == Phase::LevelClear {
            ui.draw(game)?;
            ui.message_box(CLEAR_MESSAGE)?;
            game.advance_level();
        }
    }

    Ok(game.final_score())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::geom::{Dims, Direction};
    use crate::sim::event::GameEvent;
    use crate::sim::game::Action;

    /// Plays back a fixed action list, then quits.
    struct Scripted {
        actions: VecDeque<Action>,
        splashes: u32,
        messages: Vec<String>,
        events: Vec<GameEvent>,
        /// Mine count of each level, captured by the redraw before its message box.
        cleared_totals: Vec<u32>,
    }

    impl Scripted {
        fn new(actions: &[Action]) -> Self {
            Scripted {
                actions: actions.iter().copied().collect(),
                splashes: 0,
                messages: Vec::new(),
                events: Vec::new(),
                cleared_totals: Vec::new(),
            }
        }
    }

    impl Frontend for Scripted {
        fn splash(&mut self) -> Result<()> {
            self.splashes += 1;
            Ok(())
        }

        fn draw(&mut self, game: &Game) -> Result<()> {
            if game.phase == Phase::LevelClear {
                self.cleared_totals.push(game.field.total_mines);
            }
            Ok(())
        }

        fn next_action(&mut self) -> Result<Action> {
            Ok(self.actions.pop_front().unwrap_or(Action::Quit))
        }

        fn notify(&mut self, event: &GameEvent) -> Result<()> {
            self.events.push(*event);
            Ok(())
        }

        fn message_box(&mut self, msg: &str) -> Result<()> {
            self.messages.push(msg.to_string());
            Ok(())
        }
    }

    // On a 4x4 field every mine lands on (1, 1) and the player starts on
    // (2, 2): two steps and a fire clear any level. Points per clear are
    // 16 / 2 * (3 * mines + 10 * level).
    const CLEAR_4X4: [Action; 3] = [
        Action::Move(Direction::Left),
        Action::Move(Direction::Up),
        Action::Fire,
    ];

    #[test]
    fn quit_right_away_scores_zero() {
        let mut game = Game::new(Dims::new(20, 10), StdRng::seed_from_u64(3)).unwrap();
        let mut ui = Scripted::new(&[Action::Noop, Action::Quit]);
        let score = run(&mut game, &mut ui).unwrap();
        assert_eq!(score, 0);
        assert_eq!(ui.splashes, 1);
        assert_eq!(ui.events.last(), Some(&GameEvent::Quit));
        assert_eq!(game.phase, Phase::Terminated);
    }

    #[test]
    fn one_clear_advances_one_level() {
        let mut game = Game::new(Dims::new(4, 4), StdRng::seed_from_u64(9)).unwrap();
        let mut ui = Scripted::new(&CLEAR_4X4);
        let score = run(&mut game, &mut ui).unwrap();

        assert_eq!(ui.messages, vec![CLEAR_MESSAGE]);
        assert_eq!(ui.cleared_totals.len(), 1);
        assert_eq!(game.level, 1);
        assert_eq!(game.phase, Phase::Terminated);
        assert_eq!(score, game.score.value);
        assert_eq!(score, 8 * 3 * ui.cleared_totals[0] as u64);
        let flashes = ui.events.iter().filter(|e| **e == GameEvent::MineDefused).count();
        assert_eq!(flashes as u32, ui.cleared_totals[0]);
        assert!(ui.events.contains(&GameEvent::FieldCleared { level: 0 }));
    }

    #[test]
    fn two_clears_bank_both_levels() {
        let mut game = Game::new(Dims::new(4, 4), StdRng::seed_from_u64(5)).unwrap();
        let mut script = Vec::new();
        script.extend_from_slice(&CLEAR_4X4);
        script.extend_from_slice(&CLEAR_4X4);
        // wander on level 2, then quit: pending points are dropped
        script.push(Action::Move(Direction::Left));
        script.push(Action::Quit);

        let mut ui = Scripted::new(&script);
        let score = run(&mut game, &mut ui).unwrap();

        assert_eq!(ui.messages, vec![CLEAR_MESSAGE, CLEAR_MESSAGE]);
        assert_eq!(game.level, 2);
        let (t0, t1) = (ui.cleared_totals[0] as u64, ui.cleared_totals[1] as u64);
        assert_eq!(score, 8 * 3 * t0 + 8 * (3 * t1 + 10));
        assert_eq!(score, game.score.value);
        assert!(game.score.points > 0);
    }

    #[test]
    fn reveal_and_reset_do_not_end_level() {
        let mut game = Game::new(Dims::new(16, 12), StdRng::seed_from_u64(11)).unwrap();
        let script = [
            Action::ToggleReveal,
            Action::Move(Direction::Left),
            Action::ResetPlayer,
            Action::ToggleReveal,
            Action::Quit,
        ];
        let mut ui = Scripted::new(&script);
        let score = run(&mut game, &mut ui).unwrap();
        assert_eq!(score, 0);
        assert!(ui.messages.is_empty());
        assert_eq!(game.level, 0);
        assert!(!game.field.revealed);
        let toggles = ui.events.iter().filter(|e| **e == GameEvent::RevealToggled).count();
        assert_eq!(toggles, 2);
        assert!(ui.events.contains(&GameEvent::PlayerReset));
    }
}
