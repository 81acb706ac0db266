use thiserror::Error;

use crate::Cell;

/// Construction-time invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("grid must be non-empty, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("cell {cell} lies outside the {width}x{height} grid")]
    CellOutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("an agent body needs at least one cell")]
    EmptyBody,
}
