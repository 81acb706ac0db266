use snake_core::{Cell, CoreError};

use crate::{GridGraph, Topology};

/// Per-cell obstacle counter.
///
/// A counter rather than a flag: during a tick several bodies may overlap the
/// same cell until collisions are resolved. A cell is free iff its count is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleGrid {
    width: u32,
    height: u32,
    topology: Topology,
    counts: Vec<u16>,
}

impl ObstacleGrid {
    pub fn new(width: u32, height: u32, topology: Topology) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(CoreError::EmptyGrid { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            topology,
            counts: vec![0; len],
        })
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn check(&self, cell: Cell) -> Result<(), CoreError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(CoreError::CellOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Puts one obstacle on `cell`. Returns `false` for off-grid cells.
    pub fn add(&mut self, cell: Cell) -> bool {
        self.add_n(cell, 1)
    }

    pub fn add_n(&mut self, cell: Cell, n: u16) -> bool {
        match self.idx(cell) {
            Some(idx) => {
                self.counts[idx] = self.counts[idx].saturating_add(n);
                true
            }
            None => false,
        }
    }

    /// Removes one obstacle from `cell`. Returns `false` if there was none.
    pub fn remove(&mut self, cell: Cell) -> bool {
        match self.idx(cell) {
            Some(idx) if self.counts[idx] > 0 => {
                self.counts[idx] -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of cells, i.e. `width * height`.
    pub fn area(&self) -> usize {
        self.counts.len()
    }

    /// Occupied cells with their counts, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        let width = self.width as usize;
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(move |(idx, &c)| {
                let cell = Cell::new((idx % width) as i32, (idx / width) as i32);
                (cell, u32::from(c))
            })
    }
}

impl GridGraph for ObstacleGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn topology(&self) -> Topology {
        self.topology
    }

    fn obstacle_count(&self, cell: Cell) -> u32 {
        self.idx(cell).map(|idx| u32::from(self.counts[idx])).unwrap_or(0)
    }
}
