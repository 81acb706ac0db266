use snake_core::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GridGraph, Topology};

/// Fixed-point cost of one grid step. Estimates are quantized the same way so
/// Euclidean distances stay integral without losing admissibility.
pub const COST_SCALE: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeuristicKind {
    /// Straight-line distance on a bounded grid.
    Euclidean,
    /// Taxicab distance on a bounded grid.
    Manhattan,
    /// Straight-line distance on a torus: each axis delta is the shorter of the
    /// direct and wrapped distances.
    #[default]
    PeriodicEuclidean,
}

impl HeuristicKind {
    /// The variant that is admissible for `topology`.
    pub fn for_topology(topology: Topology) -> Self {
        match topology {
            Topology::Bounded => HeuristicKind::Manhattan,
            Topology::Periodic => HeuristicKind::PeriodicEuclidean,
        }
    }
}

/// Cost estimate toward a fixed destination cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heuristic {
    kind: HeuristicKind,
    target: Cell,
    width: u32,
    height: u32,
}

impl Heuristic {
    pub fn new<G: GridGraph>(kind: HeuristicKind, graph: &G, target: Cell) -> Self {
        Self {
            kind,
            target,
            width: graph.width(),
            height: graph.height(),
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    /// Non-negative estimate, in `COST_SCALE` units, of the cost from `cell` to the target.
    pub fn estimate(&self, cell: Cell) -> u32 {
        let (dx, dy) = match self.kind {
            HeuristicKind::Euclidean | HeuristicKind::Manhattan => {
                Topology::Bounded.axis_distance(cell, self.target, self.width, self.height)
            }
            HeuristicKind::PeriodicEuclidean => {
                Topology::Periodic.axis_distance(cell, self.target, self.width, self.height)
            }
        };
        match self.kind {
            HeuristicKind::Manhattan => dx.saturating_add(dy).saturating_mul(COST_SCALE),
            HeuristicKind::Euclidean | HeuristicKind::PeriodicEuclidean => {
                let (dx, dy) = (f64::from(dx), f64::from(dy));
                let d = (dx * dx + dy * dy).sqrt() * f64::from(COST_SCALE);
                // Floor keeps the estimate admissible after quantization.
                d.floor().min(f64::from(u32::MAX)) as u32
            }
        }
    }
}
