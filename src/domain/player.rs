/// The player's cursor: position, step count, and trail signal.
///
/// Every change returns a new `Player`; the field swaps it in whole.

use super::geom::Position;
use super::proximity::{signal_for, Signal, FALLBACK};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub pos: Position,
    pub steps: u32,
    pub trail: Signal,
}

impl Player {
    pub fn centered(at: Position) -> Self {
        Player {
            pos: at,
            steps: 0,
            trail: FALLBACK.signal,
        }
    }

    /// Move to `to`, counting the Manhattan length of the move as steps.
    pub fn advanced(&self, to: Position) -> Player {
        Player {
            pos: to,
            steps: self.steps + self.pos.manhattan(to),
            ..*self
        }
    }

    /// Put the player somewhere without counting steps (manual reset).
    pub fn relocated(&self, to: Position) -> Player {
        Player { pos: to, ..*self }
    }

    /// Trail signal from the OR of every mine's proximity bit.
    pub fn with_mask(&self, mask: u8) -> Player {
        Player {
            trail: signal_for(mask),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_counts_steps() {
        let p = Player::centered(Position::new(5, 5));
        let p = p.advanced(Position::new(6, 5));
        let p = p.advanced(Position::new(6, 4));
        assert_eq!(p.pos, Position::new(6, 4));
        assert_eq!(p.steps, 2);
    }

    #[test]
    fn relocated_keeps_steps() {
        let p = Player::centered(Position::new(5, 5)).advanced(Position::new(5, 6));
        let r = p.relocated(Position::new(5, 5));
        assert_eq!(r.pos, Position::new(5, 5));
        assert_eq!(r.steps, 1);
    }

    #[test]
    fn trail_follows_mask() {
        let p = Player::centered(Position::new(1, 1));
        assert_eq!(p.trail, Signal::Normal);
        assert_eq!(p.with_mask(1 << 2).trail, Signal::Standout);
        assert_eq!(p.with_mask(1 << 2).with_mask(0).trail, Signal::Normal);
    }
}
