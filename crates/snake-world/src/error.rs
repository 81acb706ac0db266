use std::path::PathBuf;

use snake_core::{AgentId, CoreError};
use thiserror::Error;

/// Errors surfaced at the world's API boundary.
///
/// Only programmer errors end up here. Running out of space for food or a
/// respawn is handled inside the tick and never reported.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("cannot simulate a world without agents")]
    NoAgents,

    #[error("agent #{agent} names opponent #{opponent}, but only {count} agents are configured")]
    UnknownOpponent {
        agent: usize,
        opponent: usize,
        count: usize,
    },

    #[error("failed to read config from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
