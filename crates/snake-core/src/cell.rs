use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer grid coordinate. `y` grows downwards.
///
/// Coordinates are signed so a bounded topology can represent the
/// off-grid neighbor of an edge cell before the boundary test rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one unit away in direction `d`, without any wrapping.
    pub fn offset(self, d: Direction) -> Self {
        let (dx, dy) = d.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four unit moves of a 4-connected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed order for determinism: up, down, left, right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction whose delta is `(dx, dy)`, if it is a unit move.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Direction pointing from `cell` toward the center of a `width`x`height` grid.
///
/// The grid is split by its two diagonals into four triangles; a cell in the
/// bottom triangle heads up, the left one heads right, and so on.
pub fn toward_center(cell: Cell, width: u32, height: u32) -> Direction {
    let (x, y) = (i64::from(cell.x), i64::from(cell.y));
    let (w, h) = (i64::from(width), i64::from(height));

    // y > h/w * x  and  y > -h/w * (x - w), cross-multiplied by w > 0.
    let below_main = y * w > h * x;
    let below_anti = y * w > h * (w - x);
    match (below_main, below_anti) {
        (true, true) => Direction::Up,
        (true, false) => Direction::Right,
        (false, true) => Direction::Left,
        (false, false) => Direction::Down,
    }
}
