//! Grid graph primitives: bounded and periodic 4-connected topologies, an
//! obstacle counter grid, admissible heuristics, deterministic best-first
//! search and fair spawn placement.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod graph;
pub mod heuristic;
pub mod occupancy;
pub mod search;
pub mod spawn;
pub mod topology;

pub use graph::GridGraph;
pub use heuristic::{Heuristic, HeuristicKind, COST_SCALE};
pub use occupancy::ObstacleGrid;
pub use search::{best_first, SearchOutcome, SearchParams, SearchQuery, Step};
pub use spawn::{edge_midpoints, furthest_cell, sample_free_cell, DEFAULT_FOOD_TRIES};
pub use topology::Topology;
