//! Snake agents and their decision policies.
//!
//! Agents never mutate the world. Each tick they receive a read-only
//! [`DecisionContext`] (obstacle grid, food, a snapshot of every agent) and
//! emit one direction.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod context;
pub mod controller;
pub mod offensive;
pub mod pathfinding;
pub mod player;
pub mod snake;

pub use context::{AgentView, DecisionContext, SelfView};
pub use controller::{Controller, Policy};
pub use offensive::{predict_head, OffensiveConfig, OffensiveController, DEFAULT_ATTACK_ANTICIPATION};
pub use pathfinding::{Goal, PathfindingConfig, PathfindingController, PlanState};
pub use player::{PlayerController, REQUEST_DEPTH};
pub use snake::Snake;
