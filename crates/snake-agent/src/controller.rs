use snake_core::{AgentId, Cell, Direction};
use snake_grid::GridGraph;

use crate::{
    DecisionContext, OffensiveController, PathfindingController, PlanState, PlayerController,
    SelfView,
};

/// Decision capability shared by every agent variant.
pub trait Policy {
    /// Direction to move this tick.
    fn decide<G: GridGraph>(&mut self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> Direction;

    /// Drops any cached state (queued input, planned path).
    fn reset(&mut self);

    /// Cells currently under consideration, next first. Empty for agents
    /// that do not plan.
    fn inspect(&self) -> Vec<Cell> {
        Vec::new()
    }
}

/// The closed set of agent variants.
#[derive(Debug)]
pub enum Controller {
    Player(PlayerController),
    Pathfinding(PathfindingController),
    Offensive(OffensiveController),
}

impl Controller {
    /// Forwards a player request; AI variants ignore input and return `false`.
    pub fn request(&mut self, request: Direction, current: Direction) -> bool {
        match self {
            Controller::Player(p) => p.request(request, current),
            Controller::Pathfinding(_) | Controller::Offensive(_) => false,
        }
    }

    /// Registers an opponent; only the offensive variant keeps it.
    pub fn add_opponent(&mut self, opponent: AgentId) -> bool {
        match self {
            Controller::Offensive(o) => {
                o.add_opponent(opponent);
                true
            }
            Controller::Player(_) | Controller::Pathfinding(_) => false,
        }
    }

    pub fn plan_state(&self) -> Option<PlanState> {
        match self {
            Controller::Player(_) => None,
            Controller::Pathfinding(p) => Some(p.state()),
            Controller::Offensive(o) => Some(o.state()),
        }
    }

    pub fn is_ai(&self) -> bool {
        !matches!(self, Controller::Player(_))
    }
}

impl Policy for Controller {
    fn decide<G: GridGraph>(&mut self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> Direction {
        match self {
            Controller::Player(p) => p.decide(ctx, me),
            Controller::Pathfinding(p) => p.decide(ctx, me),
            Controller::Offensive(o) => o.decide(ctx, me),
        }
    }

    fn reset(&mut self) {
        match self {
            Controller::Player(p) => p.reset(),
            Controller::Pathfinding(p) => p.reset(),
            Controller::Offensive(o) => o.reset(),
        }
    }

    fn inspect(&self) -> Vec<Cell> {
        match self {
            Controller::Player(p) => p.inspect(),
            Controller::Pathfinding(p) => p.inspect(),
            Controller::Offensive(o) => o.inspect(),
        }
    }
}

impl From<PlayerController> for Controller {
    fn from(value: PlayerController) -> Self {
        Controller::Player(value)
    }
}

impl From<PathfindingController> for Controller {
    fn from(value: PathfindingController) -> Self {
        Controller::Pathfinding(value)
    }
}

impl From<OffensiveController> for Controller {
    fn from(value: OffensiveController) -> Self {
        Controller::Offensive(value)
    }
}
