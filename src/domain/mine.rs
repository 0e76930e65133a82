/// A buried mine: a cell plus a defused flag.

use rand::Rng;

use super::geom::{Dims, Position};
use super::proximity::PROXIMITY_TABLE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mine {
    pub pos: Position,
    pub defused: bool,
}

impl Mine {
    pub fn new(pos: Position) -> Self {
        Mine { pos, defused: false }
    }

    /// Uniform cell with `1 ≤ x ≤ width-3` and `1 ≤ y ≤ height-3`.
    /// Caller guarantees `dims.is_playable()`.
    pub fn random<R: Rng + ?Sized>(dims: Dims, rng: &mut R) -> Self {
        let x = rng.gen_range(1..=dims.width - 3);
        let y = rng.gen_range(1..=dims.height - 3);
        Mine::new(Position::new(x, y))
    }

    /// Proximity bit for a query cell, 0 when defused or out of every band.
    pub fn classify(&self, query: Position) -> u8 {
        if self.defused {
            return 0;
        }
        let delta = query.abs_diff(self.pos);
        PROXIMITY_TABLE
            .iter()
            .find(|p| p.check(delta))
            .map_or(0, |p| p.bit)
    }

    /// Re-evaluates the flag on every call: a miss clears a previous defuse.
    pub fn try_defuse(&mut self, query: Position) -> bool {
        self.defused = query == self.pos;
        self.defused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn classify_bands() {
        let m = Mine::new(Position::new(20, 20));
        assert_eq!(m.classify(Position::new(20, 20)), 1 << 1);
        assert_eq!(m.classify(Position::new(25, 15)), 1 << 1);
        assert_eq!(m.classify(Position::new(26, 20)), 1 << 2);
        assert_eq!(m.classify(Position::new(20, 30)), 1 << 2);
        assert_eq!(m.classify(Position::new(40, 20)), 1 << 3);
        assert_eq!(m.classify(Position::new(41, 20)), 0);
    }

    #[test]
    fn defused_mine_is_silent() {
        let mut m = Mine::new(Position::new(3, 3));
        assert!(m.try_defuse(Position::new(3, 3)));
        assert_eq!(m.classify(Position::new(3, 3)), 0);
    }

    #[test]
    fn miss_overwrites_previous_defuse() {
        let mut m = Mine::new(Position::new(3, 3));
        assert!(!m.try_defuse(Position::new(3, 4)));
        assert!(m.try_defuse(Position::new(3, 3)));
        assert!(m.defused);
        assert!(!m.try_defuse(Position::new(9, 9)));
        assert!(!m.defused);
    }

    #[test]
    fn random_stays_inside_border() {
        let dims = Dims::new(6, 5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let m = Mine::random(dims, &mut rng);
            assert!((1..=3).contains(&m.pos.x), "x out of range: {:?}", m.pos);
            assert!((1..=2).contains(&m.pos.y), "y out of range: {:?}", m.pos);
            assert!(!m.defused);
        }
    }
}
