use snake_core::{Cell, Direction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Connectivity of the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Topology {
    /// Fixed edges: stepping off the grid leaves it.
    Bounded,
    /// Toroidal wraparound on both axes.
    #[default]
    Periodic,
}

impl Topology {
    /// Adjacent cell in direction `d`. Periodic topologies wrap modulo the grid
    /// size; bounded ones return the raw (possibly off-grid) coordinate.
    pub fn step(self, cell: Cell, d: Direction, width: u32, height: u32) -> Cell {
        let next = cell.offset(d);
        match self {
            Topology::Bounded => next,
            Topology::Periodic => wrap(next, width, height),
        }
    }

    /// Per-axis step distance between two in-grid cells.
    pub fn axis_distance(self, a: Cell, b: Cell, width: u32, height: u32) -> (u32, u32) {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        match self {
            Topology::Bounded => (dx, dy),
            Topology::Periodic => (dx.min(width.saturating_sub(dx)), dy.min(height.saturating_sub(dy))),
        }
    }
}

pub(crate) fn wrap(cell: Cell, width: u32, height: u32) -> Cell {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    let h = i32::try_from(height).unwrap_or(i32::MAX);
    Cell::new(cell.x.rem_euclid(w), cell.y.rem_euclid(h))
}
