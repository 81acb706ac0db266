use snake_core::{Cell, Direction};

use crate::Topology;

/// A 4-connected square grid with an obstacle predicate.
///
/// Implementors supply the dimensions, the topology and the per-cell obstacle
/// counter; adjacency and free-neighbor enumeration are derived from those.
pub trait GridGraph {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn topology(&self) -> Topology;

    /// Number of obstacles on `cell`. Only meaningful for cells inside the grid.
    fn obstacle_count(&self, cell: Cell) -> u32;

    fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x.unsigned_abs() < self.width()
            && cell.y.unsigned_abs() < self.height()
    }

    fn is_free(&self, cell: Cell) -> bool {
        self.contains(cell) && self.obstacle_count(cell) == 0
    }

    fn neighbor(&self, cell: Cell, d: Direction) -> Cell {
        self.topology().step(cell, d, self.width(), self.height())
    }

    /// Neighbors of `cell` holding no obstacle, with the direction taken to
    /// reach them. Order is fixed: up, down, left, right.
    fn free_neighbors(&self, cell: Cell) -> impl Iterator<Item = (Cell, Direction)> + '_
    where
        Self: Sized,
    {
        Direction::ALL.into_iter().filter_map(move |d| {
            let n = self.neighbor(cell, d);
            self.is_free(n).then_some((n, d))
        })
    }

    /// Direction leading from `from` to the adjacent cell `to`, if they are neighbors.
    fn direction_between(&self, from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(from, d) == to)
    }
}
