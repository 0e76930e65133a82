/// Grid geometry: positions, directions, and field dimensions.
///
/// Positions are plain `Copy` values. Moving produces a new position;
/// nothing in the game mutates a shared coordinate in place.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one unit toward `dir`.
    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Per-axis absolute distance `(|dx|, |dy|)`.
    pub fn abs_diff(self, other: Position) -> Position {
        Position::new((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// Manhattan length of the offset to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        let d = self.abs_diff(other);
        (d.x + d.y) as u32
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Size of the field window, border included.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Dims {
    pub width: i32,
    pub height: i32,
}

impl Dims {
    /// Smallest field that still leaves room for a mine inside the border.
    pub const MIN: i32 = 4;

    pub const fn new(width: i32, height: i32) -> Self {
        Dims { width, height }
    }

    pub fn area(self) -> u64 {
        self.width.max(0) as u64 * self.height.max(0) as u64
    }

    pub fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Inside the one-cell border on every side.
    pub fn contains_interior(self, p: Position) -> bool {
        p.x >= 1 && p.x <= self.width - 2 && p.y >= 1 && p.y <= self.height - 2
    }

    pub fn is_playable(self) -> bool {
        self.width >= Self::MIN && self.height >= Self::MIN
    }
}
