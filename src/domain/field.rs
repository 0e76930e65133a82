/// MineField: the bordered play area, its mines, and the player.
///
/// ## Coordinates
///
/// `(0, 0)` is the top-left border cell of the field window. The player
/// lives strictly inside the one-cell border:
///   `1 ≤ x ≤ width-2`, `1 ≤ y ≤ height-2`.
/// Mines are dropped one cell further in (`≤ width-3`, `≤ height-3`).
///
/// ## Trail
///
/// Every visited cell keeps the signal the player carried when it stood
/// there. `reset_player` wipes it; so does a new level.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::geom::{Dims, Direction, Position};
use super::mine::Mine;
use super::player::Player;
use super::proximity::Signal;

/// Inclusive range of mines per level.
pub const MIN_MINES: u32 = 1;
pub const MAX_MINES: u32 = 3;

pub struct MineField {
    pub dims: Dims,
    pub mines: Vec<Mine>,
    pub player: Player,
    pub trail: HashMap<Position, Signal>,
    /// Cheat view: draw every mine.
    pub revealed: bool,
    pub num_defused: u32,
    pub total_mines: u32,
}

impl MineField {
    pub fn new(dims: Dims) -> Self {
        MineField {
            dims,
            mines: Vec::new(),
            player: Player::centered(dims.center()),
            trail: HashMap::new(),
            revealed: false,
            num_defused: 0,
            total_mines: 0,
        }
    }

    /// Back to an empty field with a fresh player at the center.
    pub fn reset(&mut self) {
        self.mines.clear();
        self.num_defused = 0;
        self.total_mines = 0;
        self.revealed = false;
        self.trail.clear();
        self.player = Player::centered(self.dims.center());
    }

    /// Bury 1..=3 mines at independent random cells. Cells may repeat.
    pub fn create<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.total_mines = rng.gen_range(MIN_MINES..=MAX_MINES);
        self.num_defused = 0;
        self.mines = (0..self.total_mines)
            .map(|_| Mine::random(self.dims, rng))
            .collect();
        debug!(
            "field {}x{}: buried {} mines at {:?}",
            self.dims.width,
            self.dims.height,
            self.total_mines,
            self.mines.iter().map(|m| m.pos).collect::<Vec<_>>(),
        );
        self.reset_player();
    }

    /// Re-center the player and wipe the trail. Mines and steps stay.
    pub fn reset_player(&mut self) {
        self.player = self.player.relocated(self.dims.center());
        self.trail.clear();
    }

    /// One cell toward `dir`. Returns the steps added: 1, or 0 if the
    /// move would land on the border.
    pub fn move_player(&mut self, dir: Direction) -> u32 {
        let next = self.player.pos.step(dir);
        if !self.dims.contains_interior(next) {
            return 0;
        }
        let before = self.player.steps;
        self.player = self.player.advanced(next);
        self.player.steps - before
    }

    /// Try to defuse every mine under the player. True if any mine went
    /// from live to defused in this call.
    pub fn fire(&mut self) -> bool {
        let at = self.player.pos;
        let mut hit = false;
        for mine in &mut self.mines {
            let was_defused = mine.defused;
            if mine.try_defuse(at) && !was_defused {
                hit = true;
                self.num_defused = (self.num_defused + 1).min(self.total_mines);
            }
        }
        hit
    }

    /// Flip the cheat view. Returns whether mines are now shown.
    pub fn toggle_reveal(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.revealed
    }

    pub fn status(&self) -> (u32, u32) {
        (self.num_defused, self.total_mines)
    }

    pub fn is_cleared(&self) -> bool {
        self.num_defused == self.total_mines
    }

    /// OR of every mine's proximity bit at the player's cell.
    pub fn proximity_mask(&self) -> u8 {
        self.mines
            .iter()
            .fold(0, |mask, m| mask | m.classify(self.player.pos))
    }

    /// Recompute the trail signal and mark the current cell with it.
    pub fn update(&mut self) {
        self.player = self.player.with_mask(self.proximity_mask());
        self.trail.insert(self.player.pos, self.player.trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field_with(dims: Dims, mines: &[(i32, i32)]) -> MineField {
        let mut f = MineField::new(dims);
        f.mines = mines.iter().map(|&(x, y)| Mine::new(Position::new(x, y))).collect();
        f.total_mines = f.mines.len() as u32;
        f
    }

    #[test]
    fn moves_are_whole_or_rejected_everywhere() {
        let dims = Dims::new(7, 6);
        let mut f = MineField::new(dims);
        for x in 1..=dims.width - 2 {
            for y in 1..=dims.height - 2 {
                for dir in Direction::ALL {
                    let start = Position::new(x, y);
                    f.player = Player::centered(start);
                    let added = f.move_player(dir);
                    let expected = start.step(dir);
                    if dims.contains_interior(expected) {
                        assert_eq!(added, 1);
                        assert_eq!(f.player.pos, expected);
                    } else {
                        assert_eq!(added, 0);
                        assert_eq!(f.player.pos, start);
                        assert_eq!(f.player.steps, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn fire_defuses_stacked_mines() {
        let mut f = field_with(Dims::new(10, 10), &[(5, 5), (5, 5), (2, 2)]);
        assert!(f.fire()); // player starts at center (5, 5)
        assert_eq!(f.status(), (2, 3));
        assert!(!f.is_cleared());
        assert!(f.mines[0].defused && f.mines[1].defused);
        assert!(!f.mines[2].defused);
    }

    #[test]
    fn fire_twice_on_same_cell_counts_once() {
        let mut f = field_with(Dims::new(10, 10), &[(5, 5), (2, 2)]);
        assert!(f.fire());
        assert!(!f.fire());
        assert_eq!(f.num_defused, 1);
    }

    #[test]
    fn fire_on_empty_cell_misses() {
        let mut f = field_with(Dims::new(10, 10), &[(2, 2)]);
        assert!(!f.fire());
        assert_eq!(f.num_defused, 0);
    }

    #[test]
    fn last_mine_clears_field() {
        let mut f = field_with(Dims::new(10, 10), &[(5, 4)]);
        f.move_player(Direction::Up);
        assert!(f.fire());
        assert!(f.is_cleared());
    }

    #[test]
    fn update_records_trail_signal() {
        let mut f = field_with(Dims::new(40, 40), &[(20, 12)]);
        f.update();
        assert_eq!(f.player.trail, Signal::Standout);
        f.move_player(Direction::Up);
        f.move_player(Direction::Up);
        f.move_player(Direction::Up);
        f.update();
        assert_eq!(f.player.trail, Signal::Blink);
        assert_eq!(f.trail.get(&Position::new(20, 20)), Some(&Signal::Standout));
        assert_eq!(f.trail.get(&Position::new(20, 17)), Some(&Signal::Blink));
    }

    #[test]
    fn defused_mines_stop_signalling() {
        let mut f = field_with(Dims::new(10, 10), &[(5, 5)]);
        f.update();
        assert_eq!(f.player.trail, Signal::Blink);
        f.fire();
        f.update();
        assert_eq!(f.player.trail, Signal::Normal);
    }

    #[test]
    fn out_of_range_trail_drops_to_normal() {
        let mut f = field_with(Dims::new(60, 40), &[(12, 20)]);
        // center (30, 20): dx = 18, inside the Bold band
        f.update();
        assert_eq!(f.player.trail, Signal::Bold);
        for _ in 0..10 {
            f.move_player(Direction::Right);
        }
        // dx = 28, no band at all
        f.update();
        assert_eq!(f.proximity_mask(), 0);
        assert_eq!(f.player.trail, Signal::Normal);
        assert_eq!(f.trail.get(&Position::new(40, 20)), Some(&Signal::Normal));
    }

    #[test]
    fn reset_player_recenters_and_clears_trail() {
        let mut f = field_with(Dims::new(10, 10), &[(2, 2)]);
        f.move_player(Direction::Left);
        f.update();
        f.move_player(Direction::Left);
        f.update();
        f.reset_player();
        assert_eq!(f.player.pos, Position::new(5, 5));
        assert_eq!(f.player.steps, 2);
        assert!(f.trail.is_empty());
        assert_eq!(f.mines.len(), 1);
    }

    #[test]
    fn toggle_reveal_leaves_state_alone() {
        let mut f = field_with(Dims::new(10, 10), &[(2, 2)]);
        assert!(f.toggle_reveal());
        assert!(!f.toggle_reveal());
        assert_eq!(f.mines[0], Mine::new(Position::new(2, 2)));
        assert_eq!(f.player.pos, Position::new(5, 5));
    }

    #[test]
    fn create_respects_mine_count_and_bounds() {
        let dims = Dims::new(12, 9);
        let mut rng = StdRng::seed_from_u64(42);
        let mut f = MineField::new(dims);
        for _ in 0..200 {
            f.reset();
            f.create(&mut rng);
            assert!((MIN_MINES..=MAX_MINES).contains(&f.total_mines));
            assert_eq!(f.mines.len() as u32, f.total_mines);
            assert_eq!(f.num_defused, 0);
            assert_eq!(f.player.pos, dims.center());
            for m in &f.mines {
                assert!(m.pos.x >= 1 && m.pos.x <= dims.width - 3);
                assert!(m.pos.y >= 1 && m.pos.y <= dims.height - 3);
            }
        }
    }

    #[test]
    fn seeded_layouts_repeat() {
        let dims = Dims::new(30, 20);
        let mut a = MineField::new(dims);
        let mut b = MineField::new(dims);
        a.create(&mut StdRng::seed_from_u64(99));
        b.create(&mut StdRng::seed_from_u64(99));
        assert_eq!(a.mines, b.mines);
    }
}
