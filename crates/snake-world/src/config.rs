//! Constructor-time world configuration, loadable from YAML.

#[cfg(feature = "serde")]
use std::path::Path;

use snake_agent::{
    OffensiveConfig, OffensiveController, PathfindingConfig, PathfindingController,
    PlayerController, Snake, DEFAULT_ATTACK_ANTICIPATION,
};
use snake_core::{AgentId, Cell, Direction};
use snake_grid::{Topology, DEFAULT_FOOD_TRIES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, WorldError};

/// Everything needed to build a [`crate::World`] and its agents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Number of food cells the world keeps on the grid.
    pub food: usize,
    /// Rejection-sampling budget for each food placement.
    pub food_tries: u32,
    /// Ticks between respawns. `None` disables respawning.
    pub respawn_cooldown: Option<u32>,
    pub topology: Topology,
    /// Seed of every random draw (food placement, death order).
    pub seed: u64,
    /// Agents in attach order: the n-th entry becomes `AgentId(n)`.
    pub agents: Vec<AgentSpec>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            food: 1,
            food_tries: DEFAULT_FOOD_TRIES,
            respawn_cooldown: None,
            topology: Topology::Periodic,
            seed: 0,
            agents: Vec::new(),
        }
    }
}

impl WorldConfig {
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a YAML file.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Checks cross-references that serde cannot: opponent indices.
    pub fn validate(&self) -> Result<()> {
        let count = self.agents.len();
        for (agent, spec) in self.agents.iter().enumerate() {
            if let Some(&opponent) = spec.opponents.iter().find(|&&o| o >= count) {
                return Err(WorldError::UnknownOpponent {
                    agent,
                    opponent,
                    count,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentKind {
    #[default]
    Player,
    Pathfinding,
    Offensive,
}

/// One agent of a [`WorldConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentSpec {
    pub kind: AgentKind,
    /// Initial body, head first.
    pub body: Vec<Cell>,
    pub direction: Direction,
    /// `false` puts the agent straight into the respawn queue.
    pub alive: bool,
    /// Search settings of pathfinding and offensive agents.
    pub pathfinding: PathfindingConfig,
    /// Offensive agents only.
    pub attack_anticipation: u32,
    /// Offensive agents only: attach indices of the agents to hunt.
    pub opponents: Vec<usize>,
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self {
            kind: AgentKind::default(),
            body: Vec::new(),
            direction: Direction::Right,
            alive: true,
            pathfinding: PathfindingConfig::default(),
            attack_anticipation: DEFAULT_ATTACK_ANTICIPATION,
            opponents: Vec::new(),
        }
    }
}

impl AgentSpec {
    /// Builds the described snake with its opponents registered.
    pub fn build(&self) -> Result<Snake> {
        let body = self.body.iter().copied();
        let snake = match self.kind {
            AgentKind::Player => Snake::new(body, self.direction, PlayerController::new())?,
            AgentKind::Pathfinding => Snake::new(
                body,
                self.direction,
                PathfindingController::new(self.pathfinding),
            )?,
            AgentKind::Offensive => {
                let controller = OffensiveController::new(OffensiveConfig {
                    pathfinding: self.pathfinding,
                    attack_anticipation: self.attack_anticipation,
                })
                .with_opponents(self.opponents.iter().map(|&o| AgentId(o as u32)));
                Snake::new(body, self.direction, controller)?
            }
        };
        Ok(snake.with_alive(self.alive))
    }
}
