use snake_core::{AgentId, Cell, Direction};
use snake_grid::{GridGraph, SearchOutcome, Topology};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecisionContext, Goal, PathfindingConfig, PathfindingController, PlanState, Policy, SelfView,
};

pub const DEFAULT_ATTACK_ANTICIPATION: u32 = 15;

/// Opponent's head after `ticks` straight moves along `direction`.
///
/// Periodic grids wrap; bounded grids stop at the last in-bounds cell.
pub fn predict_head<G: GridGraph>(graph: &G, head: Cell, direction: Direction, ticks: u32) -> Cell {
    let mut cell = head;
    for _ in 0..ticks {
        let next = graph.neighbor(cell, direction);
        if graph.topology() == Topology::Bounded && !graph.contains(next) {
            break;
        }
        cell = next;
    }
    cell
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OffensiveConfig {
    pub pathfinding: PathfindingConfig,
    /// Lookahead, in ticks, of opponent head prediction.
    pub attack_anticipation: u32,
}

impl Default for OffensiveConfig {
    fn default() -> Self {
        Self {
            pathfinding: PathfindingConfig::default(),
            attack_anticipation: DEFAULT_ATTACK_ANTICIPATION,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Prediction {
    opponent: AgentId,
    heading: Direction,
    cell: Cell,
}

impl Prediction {
    fn meeting(self) -> Goal {
        Goal::Opponent {
            opponent: self.opponent,
            heading: self.heading,
            cell: self.cell,
        }
    }
}

#[derive(Debug, Default)]
struct Interceptor {
    anticipation: u32,
    opponents: Vec<AgentId>,
    target: Option<AgentId>,
}

impl Interceptor {
    fn live_opponents<G: GridGraph>(
        &self,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) -> Vec<Prediction> {
        self.opponents
            .iter()
            .filter(|&&id| Some(id) != me.id)
            .filter_map(|&id| ctx.alive_agent(id))
            .map(|view| Prediction {
                opponent: view.id,
                heading: view.direction,
                cell: view.head,
            })
            .collect()
    }

    fn pursuit<G: GridGraph>(&self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> Option<Prediction> {
        self.live_opponents(ctx, me).into_iter().next().map(|mut p| {
            p.cell = predict_head(ctx.grid, p.cell, p.heading, self.anticipation);
            p
        })
    }

    /// Looks for a path reaching an opponent's extrapolated head `delay` ticks
    /// ahead, for growing `delay`. A path of length `L` is accepted when the
    /// agent gets there strictly before the opponent and its tail has not left
    /// the cell yet: `delay - len < L < delay`. Arriving on the same tick
    /// would put both heads on one cell.
    fn plan_interception<G: GridGraph>(
        &mut self,
        base: &mut PathfindingController,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) -> bool {
        let current = self
            .target
            .filter(|&id| Some(id) != me.id)
            .and_then(|id| ctx.alive_agent(id))
            .map(|view| Prediction {
                opponent: view.id,
                heading: view.direction,
                cell: view.head,
            });
        let mut predictions: Vec<Prediction> = match current {
            Some(p) => vec![p],
            None => self.live_opponents(ctx, me),
        };

        for delay in 1..=self.anticipation as usize {
            predictions.retain_mut(|p| {
                p.cell = ctx.grid.neighbor(p.cell, p.heading);
                ctx.grid.is_free(p.cell)
            });
            if predictions.is_empty() {
                break;
            }

            let mut best: Option<(SearchOutcome, Prediction)> = None;
            for &p in &predictions {
                let outcome = base.search(ctx, me.head, p.cell);
                let len = outcome.len();
                let in_window = outcome.reached && len > 0 && len < delay && delay < len + me.len;
                if in_window && best.as_ref().map_or(true, |(found, _)| len < found.len()) {
                    best = Some((outcome, p));
                }
            }

            if let Some((outcome, p)) = best {
                tracing::trace!(
                    tick = ctx.tick,
                    agent = ?me.id,
                    opponent = %p.opponent,
                    delay,
                    cell = %p.cell,
                    "interception found"
                );
                self.target = Some(p.opponent);
                base.commit(outcome, p.meeting());
                return true;
            }
        }
        self.target = None;
        false
    }

    fn replan<G: GridGraph>(
        &mut self,
        base: &mut PathfindingController,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) {
        if self.plan_interception(base, ctx, me) || base.plan_nearest_food(ctx, me) {
            return;
        }
        if let Some(p) = self.pursuit(ctx, me) {
            let outcome = base.search(ctx, me.head, p.cell);
            let goal = Goal::Pursuit {
                opponent: p.opponent,
                anticipation: self.anticipation,
                cell: p.cell,
            };
            base.commit(outcome, goal);
        }
    }
}

/// Pathfinding agent that tries to cut off registered opponents.
///
/// Each replan first looks for an interception. Without one it eats like a
/// [`PathfindingController`], and if no food is reachable either it heads for
/// the opponent's head `attack_anticipation` ticks ahead.
#[derive(Debug, Default)]
pub struct OffensiveController {
    base: PathfindingController,
    interceptor: Interceptor,
}

impl OffensiveController {
    pub fn new(config: OffensiveConfig) -> Self {
        Self {
            base: PathfindingController::new(config.pathfinding),
            interceptor: Interceptor {
                anticipation: config.attack_anticipation,
                ..Interceptor::default()
            },
        }
    }

    pub fn with_opponents(mut self, opponents: impl IntoIterator<Item = AgentId>) -> Self {
        for opponent in opponents {
            self.add_opponent(opponent);
        }
        self
    }

    /// Registers `opponent`. Registering twice is a no-op.
    pub fn add_opponent(&mut self, opponent: AgentId) {
        if !self.interceptor.opponents.contains(&opponent) {
            self.interceptor.opponents.push(opponent);
        }
    }

    pub fn opponents(&self) -> &[AgentId] {
        &self.interceptor.opponents
    }

    /// Opponent currently being intercepted.
    pub fn target(&self) -> Option<AgentId> {
        self.interceptor.target
    }

    pub fn attack_anticipation(&self) -> u32 {
        self.interceptor.anticipation
    }

    pub fn state(&self) -> PlanState {
        self.base.state()
    }

    pub fn goal(&self) -> Option<Goal> {
        self.base.goal()
    }

    /// Head of the first live registered opponent, extrapolated
    /// `attack_anticipation` ticks along its current heading.
    pub fn anticipated_target<G: GridGraph>(
        &self,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) -> Option<Cell> {
        self.interceptor.pursuit(ctx, me).map(|p| p.cell)
    }
}

impl Policy for OffensiveController {
    fn decide<G: GridGraph>(&mut self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> Direction {
        let interceptor = &mut self.interceptor;
        self.base
            .decide_with(ctx, me, |base, ctx, me| interceptor.replan(base, ctx, me))
    }

    fn reset(&mut self) {
        self.base.reset();
        self.interceptor.target = None;
    }

    fn inspect(&self) -> Vec<Cell> {
        self.base.inspect()
    }
}
