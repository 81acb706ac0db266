//! The snake world and its tick.
//!
//! [`World::simulate`] runs one tick in fixed phases, each applied to every
//! alive agent before the next starts:
//!
//! 1. decision, against one shared pre-tick snapshot;
//! 2. movement;
//! 3. self-collision cuts;
//! 4. food consumption and growth;
//! 5. inter-agent collisions and deaths;
//! 6. food restock;
//! 7. respawn of the longest-dead agent.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod roster;
pub mod world;

pub use config::{AgentKind, AgentSpec, WorldConfig};
pub use error::{Result, WorldError};
pub use roster::Roster;
pub use world::World;
