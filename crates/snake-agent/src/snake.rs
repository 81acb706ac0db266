use std::collections::VecDeque;

use snake_core::{AgentId, Cell, CoreError, Direction};
use snake_grid::GridGraph;

use crate::{
    AgentView, Controller, DecisionContext, OffensiveConfig, OffensiveController,
    PathfindingConfig, PathfindingController, PlanState, PlayerController, Policy, SelfView,
};

/// A snake: body cells head first, a heading, an alive flag and the
/// controller that picks its next move.
///
/// The world owns every snake and is the only caller of the mutating tick
/// operations ([`Snake::advance`], [`Snake::cut`], [`Snake::grow`],
/// [`Snake::kill`], [`Snake::respawn`]).
#[derive(Debug)]
pub struct Snake {
    id: Option<AgentId>,
    body: VecDeque<Cell>,
    direction: Direction,
    alive: bool,
    initial_body: Vec<Cell>,
    initial_direction: Direction,
    controller: Controller,
    eaten: u64,
}

impl Snake {
    pub fn new(
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        controller: impl Into<Controller>,
    ) -> Result<Self, CoreError> {
        let initial_body: Vec<Cell> = body.into_iter().collect();
        if initial_body.is_empty() {
            return Err(CoreError::EmptyBody);
        }
        Ok(Self {
            id: None,
            body: initial_body.iter().copied().collect(),
            direction,
            alive: true,
            initial_body,
            initial_direction: direction,
            controller: controller.into(),
            eaten: 0,
        })
    }

    pub fn player(body: impl IntoIterator<Item = Cell>, direction: Direction) -> Result<Self, CoreError> {
        Self::new(body, direction, PlayerController::new())
    }

    pub fn pathfinding(
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        config: PathfindingConfig,
    ) -> Result<Self, CoreError> {
        Self::new(body, direction, PathfindingController::new(config))
    }

    pub fn offensive(
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        config: OffensiveConfig,
    ) -> Result<Self, CoreError> {
        Self::new(body, direction, OffensiveController::new(config))
    }

    /// Sets the initial alive flag; a dead snake enters the world through the
    /// respawn queue.
    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = alive;
        self
    }

    /// Assigned once by the world on attach.
    pub fn set_id(&mut self, id: AgentId) {
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<AgentId> {
        self.id
    }

    /// Body cells, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: construction rejects it and cuts keep the head.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn initial_len(&self) -> usize {
        self.initial_body.len()
    }

    pub fn initial_body(&self) -> &[Cell] {
        &self.initial_body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current length.
    pub fn score(&self) -> usize {
        self.len()
    }

    /// Food eaten since the last reset.
    pub fn eaten(&self) -> u64 {
        self.eaten
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn plan_state(&self) -> Option<PlanState> {
        self.controller.plan_state()
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id.unwrap_or_default(),
            head: self.head(),
            direction: self.direction,
            len: self.len(),
            alive: self.alive,
        }
    }

    fn self_view(&self) -> SelfView {
        SelfView {
            id: self.id,
            head: self.head(),
            direction: self.direction,
            len: self.len(),
        }
    }

    /// Queues a player move. Ignored by AI snakes.
    pub fn request(&mut self, direction: Direction) -> bool {
        self.controller.request(direction, self.direction)
    }

    pub fn add_opponent(&mut self, opponent: AgentId) -> bool {
        self.controller.add_opponent(opponent)
    }

    /// Cells the controller is currently heading through.
    pub fn inspect(&self) -> Vec<Cell> {
        self.controller.inspect()
    }

    /// Asks the controller for this tick's direction and adopts it.
    pub fn decide<G: GridGraph>(&mut self, ctx: &DecisionContext<'_, G>) -> Direction {
        let me = self.self_view();
        self.direction = self.controller.decide(ctx, &me);
        self.direction
    }

    /// Moves the head to `next` and drops the tail; returns the vacated cell.
    pub fn advance(&mut self, next: Cell) -> Cell {
        self.body.push_front(next);
        self.body.pop_back().unwrap_or(next)
    }

    /// Segments to drop after the head ran into its own body.
    ///
    /// `head_count` is the obstacle counter of the head cell after movement.
    /// The cut starts right behind the first body cell (from the tail) that
    /// the head overlaps, so the head and the segments in front of the
    /// collision point survive.
    pub fn self_cut_len(&self, head_count: u32) -> usize {
        if head_count <= 1 {
            return 0;
        }
        let head = self.head();
        self.body
            .iter()
            .rev()
            .position(|&cell| cell == head)
            .map_or(0, |from_tail| (from_tail + 1) % self.len())
    }

    /// Drops the last `n` segments and returns them, tail first.
    pub fn cut(&mut self, n: usize) -> Vec<Cell> {
        let n = n.min(self.len().saturating_sub(1));
        (0..n).filter_map(|_| self.body.pop_back()).collect()
    }

    /// Adds one segment on top of the current tail; returns its cell.
    pub fn grow(&mut self) -> Cell {
        let tail = self.body.back().copied().unwrap_or(self.head());
        self.body.push_back(tail);
        self.eaten += 1;
        tail
    }

    /// Number of this snake's segments on `cell`.
    pub fn own_count(&self, cell: Cell) -> u32 {
        self.body.iter().filter(|&&c| c == cell).count() as u32
    }

    /// Marks the snake dead and drops its controller state.
    ///
    /// The body is kept so the caller can release its occupancy and show it.
    pub fn kill(&mut self) -> &VecDeque<Cell> {
        self.alive = false;
        self.controller.reset();
        &self.body
    }

    /// Revives the snake coiled on `at`: every segment sits on that cell
    /// until it unrolls over the next moves.
    pub fn respawn(&mut self, at: Cell, direction: Direction) {
        let len = self.initial_len();
        self.body.clear();
        self.body.extend(std::iter::repeat(at).take(len));
        self.direction = direction;
        self.alive = true;
        self.controller.reset();
    }

    /// Restores the snake as it was built, ready for a new game. The alive
    /// flag is left to the caller.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(self.initial_body.iter().copied());
        self.direction = self.initial_direction;
        self.eaten = 0;
        self.controller.reset();
    }
}
