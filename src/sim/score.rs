/// Score banner state.
///
/// `points` is the running value for the level in progress and is
/// recomputed every frame. It only reaches `value` (the banked score)
/// when a level is cleared and `new_level` folds it in.

use std::fmt;

/// Points per defused mine.
pub const PPM: u64 = 3;
/// Per-level bonus multiplier.
pub const PT_MOD: u64 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u64,
    pub points: u64,
    pub mines_defused: u32,
    pub total_mines: u32,
    pub steps: u32,
    pub level: u32,
    pub field_area: u64,
}

impl Score {
    pub fn new(field_area: u64) -> Self {
        Score { field_area, ..Score::default() }
    }

    /// Copy the field's counters in, then recompute `points`.
    pub fn record(&mut self, steps: u32, defused: u32, total: u32) {
        self.steps = steps;
        self.mines_defused = defused;
        self.total_mines = total;
        self.update_points();
    }

    /// `floor(area / steps * (defused * PPM + PT_MOD * level))`.
    /// With no steps taken the previous value stands.
    pub fn update_points(&mut self) {
        if self.steps == 0 {
            return;
        }
        let ratio = self.field_area as f64 / self.steps as f64;
        let per_mine = (self.mines_defused as u64 * PPM + PT_MOD * self.level as u64) as f64;
        self.points = (ratio * per_mine) as u64;
    }

    /// Bank the pending points and start counting for `level`.
    /// Always leaves `points == 0`.
    pub fn new_level(&mut self, level: u32, total_mines: u32) {
        self.value += self.points;
        self.points = 0;
        self.steps = 0;
        self.mines_defused = 0;
        self.level = level;
        self.total_mines = total_mines;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score[{}] mines[{}:{}] steps[{}] lvl[{}]",
            self.value, self.mines_defused, self.total_mines, self.steps, self.level
        )
    }
}
