use std::collections::VecDeque;

use snake_core::{AgentId, Cell, Direction};
use snake_grid::{
    best_first, GridGraph, Heuristic, HeuristicKind, SearchOutcome, SearchParams, SearchQuery,
    Step, COST_SCALE,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{predict_head, DecisionContext, Policy, SelfView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindingConfig {
    pub heuristic: HeuristicKind,
    /// Ticks a stale path keeps being followed before the agent replans.
    pub latency: u32,
    /// Preferred number of free neighbors around each step. Tie-break only.
    pub caution: u32,
    /// Closed-node budget of a single search.
    pub max_expansions: usize,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::default(),
            latency: 0,
            caution: 0,
            max_expansions: SearchParams::DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl PathfindingConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            max_expansions: self.max_expansions,
            caution: self.caution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanState {
    /// No cached path.
    #[default]
    Idle,
    /// The cached path is stale but latency holds back the replan.
    Planning,
    FollowingPath,
    /// The last decision could not follow a complete path.
    Blocked,
}

/// What the cached path leads to; decides when the path goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// A food cell. Stale once the food is gone.
    Food(Cell),
    /// Meeting point with an opponent's predicted head. Stale once the
    /// opponent dies or turns.
    Opponent {
        opponent: AgentId,
        heading: Direction,
        cell: Cell,
    },
    /// An opponent's head extrapolated `anticipation` ticks ahead. Stale as
    /// soon as the same extrapolation from its current head lands elsewhere.
    Pursuit {
        opponent: AgentId,
        anticipation: u32,
        cell: Cell,
    },
}

impl Goal {
    pub fn cell(&self) -> Cell {
        match *self {
            Goal::Food(cell) => cell,
            Goal::Opponent { cell, .. } | Goal::Pursuit { cell, .. } => cell,
        }
    }

    fn is_valid<G: GridGraph>(&self, ctx: &DecisionContext<'_, G>) -> bool {
        match *self {
            Goal::Food(cell) => ctx.food.contains(&cell),
            Goal::Opponent {
                opponent, heading, ..
            } => ctx
                .alive_agent(opponent)
                .is_some_and(|view| view.direction == heading),
            Goal::Pursuit {
                opponent,
                anticipation,
                cell,
            } => ctx.alive_agent(opponent).is_some_and(|view| {
                predict_head(ctx.grid, view.head, view.direction, anticipation) == cell
            }),
        }
    }
}

/// Agent that follows a best-first path toward the nearest reachable food.
#[derive(Debug, Default)]
pub struct PathfindingController {
    config: PathfindingConfig,
    path: VecDeque<Step>,
    goal: Option<Goal>,
    cooldown: u32,
    state: PlanState,
    query: SearchQuery,
}

impl PathfindingController {
    pub fn new(config: PathfindingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    pub fn goal(&self) -> Option<Goal> {
        self.goal
    }

    fn is_stale<G: GridGraph>(&self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> bool {
        let Some(next) = self.path.front() else {
            return true;
        };
        ctx.grid.neighbor(me.head, next.direction) != next.cell
            || !ctx.grid.is_free(next.cell)
            || !self.goal.is_some_and(|goal| goal.is_valid(ctx))
    }

    /// Runs one decision with `replan` as the planning strategy.
    ///
    /// `replan` is only called when there is no cached path, or when the path
    /// is stale and the latency cooldown has elapsed. It is expected to commit
    /// a path through [`PathfindingController::commit`].
    pub(crate) fn decide_with<G, F>(
        &mut self,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
        replan: F,
    ) -> Direction
    where
        G: GridGraph,
        F: FnOnce(&mut Self, &DecisionContext<'_, G>, &SelfView),
    {
        let stale = self.is_stale(ctx, me);
        if self.path.is_empty() || (stale && self.cooldown == 0) {
            self.path.clear();
            self.goal = None;
            self.cooldown = self.config.latency;
            replan(self, ctx, me);
            tracing::trace!(
                tick = ctx.tick,
                agent = ?me.id,
                steps = self.path.len(),
                state = ?self.state,
                "replanned"
            );
        } else {
            self.cooldown = self.cooldown.saturating_sub(1);
            self.state = if stale {
                PlanState::Planning
            } else {
                PlanState::FollowingPath
            };
        }

        match self.path.pop_front() {
            Some(step) => step.direction,
            None => {
                self.state = PlanState::Blocked;
                self.fallback_direction(ctx, me)
            }
        }
    }

    /// Best-first search from `from` toward `target` with this agent's settings.
    pub(crate) fn search<G: GridGraph>(
        &mut self,
        ctx: &DecisionContext<'_, G>,
        from: Cell,
        target: Cell,
    ) -> SearchOutcome {
        let heuristic = Heuristic::new(self.config.heuristic, ctx.grid, target);
        best_first(
            ctx.grid,
            from,
            &heuristic,
            self.config.search_params(),
            &mut self.query,
        )
    }

    /// Caches `outcome` as the path to `goal`.
    ///
    /// A complete path is kept whole. An incomplete one only contributes its
    /// first step, so the agent replans on the next tick.
    pub(crate) fn commit(&mut self, outcome: SearchOutcome, goal: Goal) {
        self.goal = Some(goal);
        if outcome.reached && !outcome.steps.is_empty() {
            self.path = outcome.steps.into();
            self.state = PlanState::FollowingPath;
        } else {
            self.path = outcome.first_step().into_iter().collect();
            self.state = PlanState::Blocked;
        }
    }

    /// Plans the shortest complete path to any free food cell.
    ///
    /// Candidates are tried nearest-estimate first; a candidate whose estimate
    /// already exceeds the best path found is skipped. When no food is
    /// reachable, the agent heads for the closest node it saw while searching
    /// toward the nearest food.
    pub(crate) fn plan_nearest_food<G: GridGraph>(
        &mut self,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) -> bool {
        let mut candidates: Vec<(u32, Cell)> = ctx
            .food
            .iter()
            .filter(|&&cell| ctx.grid.is_free(cell))
            .map(|&cell| {
                let h = Heuristic::new(self.config.heuristic, ctx.grid, cell);
                (h.estimate(me.head), cell)
            })
            .collect();
        candidates.sort_unstable();

        let mut best: Option<(SearchOutcome, Cell)> = None;
        for &(estimate, cell) in &candidates {
            if let Some((found, _)) = &best {
                let bound = u32::try_from(found.len())
                    .unwrap_or(u32::MAX)
                    .saturating_mul(COST_SCALE);
                if estimate >= bound {
                    continue;
                }
            }
            let outcome = self.search(ctx, me.head, cell);
            if !outcome.reached || outcome.is_empty() {
                continue;
            }
            if best
                .as_ref()
                .map_or(true, |(found, _)| outcome.len() < found.len())
            {
                best = Some((outcome, cell));
            }
        }

        match best {
            Some((outcome, cell)) => {
                self.commit(outcome, Goal::Food(cell));
                true
            }
            None => {
                if let Some(&(_, cell)) = candidates.first() {
                    let outcome = self.search(ctx, me.head, cell);
                    self.commit(outcome, Goal::Food(cell));
                }
                false
            }
        }
    }

    /// A direction toward a free neighbor, closest to the current goal first,
    /// then roomier cells, then keeping the current heading. Falls back to the
    /// current heading when every neighbor is blocked.
    fn fallback_direction<G: GridGraph>(
        &self,
        ctx: &DecisionContext<'_, G>,
        me: &SelfView,
    ) -> Direction {
        let heuristic = self
            .goal
            .map(|goal| Heuristic::new(self.config.heuristic, ctx.grid, goal.cell()));
        let caution = self.config.caution;

        ctx.grid
            .free_neighbors(me.head)
            .min_by_key(|&(cell, direction)| {
                let estimate = heuristic.map_or(0, |h| h.estimate(cell));
                let room = ctx
                    .grid
                    .free_neighbors(cell)
                    .filter(|&(n, _)| n != me.head)
                    .count() as u32;
                let cramped = caution > 0 && room < caution;
                (estimate, cramped, direction != me.direction)
            })
            .map(|(_, direction)| direction)
            .unwrap_or(me.direction)
    }
}

impl Policy for PathfindingController {
    fn decide<G: GridGraph>(&mut self, ctx: &DecisionContext<'_, G>, me: &SelfView) -> Direction {
        self.decide_with(ctx, me, |this, ctx, me| {
            this.plan_nearest_food(ctx, me);
        })
    }

    fn reset(&mut self) {
        self.path.clear();
        self.goal = None;
        self.cooldown = 0;
        self.state = PlanState::Idle;
    }

    fn inspect(&self) -> Vec<Cell> {
        self.path.iter().map(|step| step.cell).collect()
    }
}
