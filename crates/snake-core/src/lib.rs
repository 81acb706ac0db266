//! Deterministic primitives shared by the snaketron crates: cells, directions,
//! agent identity, tick context and seeded randomness.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod cell;
pub mod error;
pub mod rng;
pub mod tick;

pub use agent::AgentId;
pub use cell::{toward_center, Cell, Direction};
pub use error::CoreError;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
