use std::collections::BTreeSet;

use snake_core::{AgentId, Cell, Direction};
use snake_grid::GridGraph;

/// Public state of an agent as seen by every other agent during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentView {
    pub id: AgentId,
    pub head: Cell,
    pub direction: Direction,
    pub len: usize,
    pub alive: bool,
}

/// The deciding agent's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfView {
    pub id: Option<AgentId>,
    pub head: Cell,
    pub direction: Direction,
    pub len: usize,
}

/// Read-only snapshot handed to every agent in the decision phase.
///
/// All agents of a tick decide against the same snapshot, taken before any of
/// them moves.
#[derive(Debug)]
pub struct DecisionContext<'a, G: GridGraph> {
    pub tick: u64,
    pub grid: &'a G,
    pub food: &'a BTreeSet<Cell>,
    /// Every attached agent, indexed by id.
    pub agents: &'a [AgentView],
}

impl<'a, G: GridGraph> DecisionContext<'a, G> {
    pub fn new(tick: u64, grid: &'a G, food: &'a BTreeSet<Cell>, agents: &'a [AgentView]) -> Self {
        Self {
            tick,
            grid,
            food,
            agents,
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentView> {
        self.agents.get(id.index()).filter(|view| view.id == id)
    }

    pub fn alive_agent(&self, id: AgentId) -> Option<&AgentView> {
        self.agent(id).filter(|view| view.alive)
    }
}
