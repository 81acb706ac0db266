use std::collections::BTreeSet;

use snake_agent::{AgentView, DecisionContext, Snake};
use snake_core::{toward_center, AgentId, Cell, DeterministicRng, Direction, TickContext};
use snake_grid::{
    edge_midpoints, furthest_cell, sample_free_cell, GridGraph, ObstacleGrid, Topology,
    DEFAULT_FOOD_TRIES,
};
use snake_tools::{tags, NullTraceSink, TraceEvent, TraceSink};

use crate::{Result, Roster, WorldConfig, WorldError};

const FOOD_STREAM: u64 = 1;
const DEATH_STREAM: u64 = 2;
const RESET_STREAM: u64 = 3;

/// A snake world: obstacle counters, food, and the agents living on them.
///
/// The world is the sole owner and mutator of its state. Agents only see a
/// read-only [`DecisionContext`] while deciding.
///
/// A freshly built world has no food. Call [`World::reset`] once the agents
/// are attached to start a game ([`World::from_config`] does it for you).
#[derive(Debug)]
pub struct World {
    grid: ObstacleGrid,
    food: BTreeSet<Cell>,
    food_target: usize,
    food_tries: u32,
    respawn_cooldown: Option<u32>,
    cooldown: u32,
    seed: u64,
    tick: u64,
    agents: Vec<Snake>,
    roster: Roster,
}

impl World {
    pub fn new(width: u32, height: u32, topology: Topology, food: usize) -> Result<Self> {
        Ok(Self {
            grid: ObstacleGrid::new(width, height, topology)?,
            food: BTreeSet::new(),
            food_target: food,
            food_tries: DEFAULT_FOOD_TRIES,
            respawn_cooldown: None,
            cooldown: 0,
            seed: 0,
            tick: 0,
            agents: Vec::new(),
            roster: Roster::default(),
        })
    }

    /// Ticks a dead agent waits between respawns; `None` never respawns.
    pub fn with_respawn_cooldown(mut self, cooldown: Option<u32>) -> Self {
        self.respawn_cooldown = cooldown;
        self.cooldown = cooldown.unwrap_or(0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_food_tries(mut self, tries: u32) -> Self {
        self.food_tries = tries;
        self
    }

    /// Builds the world, attaches every configured agent in order and resets it.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::new(config.width, config.height, config.topology, config.food)?
            .with_respawn_cooldown(config.respawn_cooldown)
            .with_seed(config.seed)
            .with_food_tries(config.food_tries);
        for spec in &config.agents {
            world.attach(spec.build()?)?;
        }
        world.reset();
        Ok(world)
    }

    /// Adds `snake` to the world and returns its id.
    ///
    /// Ids are handed out in attach order. An alive snake occupies its body
    /// cells right away; a dead one joins the back of the respawn queue.
    pub fn attach(&mut self, mut snake: Snake) -> Result<AgentId> {
        for &cell in snake.body() {
            self.grid.check(cell)?;
        }
        let id = AgentId(self.agents.len() as u32);
        snake.set_id(id);
        if snake.is_alive() {
            for &cell in snake.body() {
                self.grid.add(cell);
            }
        }
        self.roster.enlist(id, snake.is_alive());
        tracing::debug!(agent = %id, alive = snake.is_alive(), len = snake.len(), "agent attached");
        self.agents.push(snake);
        Ok(id)
    }

    /// Starts a new game.
    ///
    /// Alive agents go back to their initial bodies and occupancy is rebuilt
    /// from them. Dead agents stay queued for respawn, in order, with their
    /// state cleared. Food is refilled and the respawn cooldown restarts.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.grid.clear();
        for snake in &mut self.agents {
            snake.reset();
        }
        for &id in self.roster.alive() {
            if let Some(snake) = self.agents.get(id.index()) {
                for &cell in snake.body() {
                    self.grid.add(cell);
                }
            }
        }

        self.food.clear();
        let ctx = TickContext::new(self.tick, self.seed);
        self.restock(&mut ctx.rng_for_stream(RESET_STREAM), self.tick, &mut NullTraceSink);
        self.cooldown = self.respawn_cooldown.unwrap_or(0);
        tracing::debug!(
            alive = self.roster.alive_len(),
            dead = self.roster.dead_len(),
            food = self.food.len(),
            "world reset"
        );
    }

    /// Runs one tick and returns the agents that died during it.
    pub fn simulate(&mut self) -> Result<Vec<AgentId>> {
        self.simulate_traced(&mut NullTraceSink)
    }

    /// [`World::simulate`], reporting every food, cut, death and respawn
    /// event to `sink`.
    pub fn simulate_traced(&mut self, sink: &mut dyn TraceSink) -> Result<Vec<AgentId>> {
        if self.agents.is_empty() {
            return Err(WorldError::NoAgents);
        }
        let ctx = TickContext::new(self.tick, self.seed);
        let alive: Vec<AgentId> = self.roster.alive().to_vec();

        self.decide(&alive);
        self.advance(&alive);
        self.resolve_self_collisions(&alive, sink);
        let eaten = self.consume_food(&alive, sink);
        let deaths = self.resolve_collisions(&alive, &ctx, sink);
        self.restock(&mut ctx.rng_for_stream(FOOD_STREAM), self.tick, sink);
        let respawned = self.respawn(sink);

        tracing::debug!(
            tick = self.tick,
            alive = self.roster.alive_len(),
            eaten,
            deaths = deaths.len(),
            respawned = ?respawned,
            "tick simulated"
        );
        self.tick += 1;
        Ok(deaths)
    }

    /// Every alive agent decides against the same pre-tick snapshot.
    fn decide(&mut self, alive: &[AgentId]) {
        let views: Vec<AgentView> = self.agents.iter().map(Snake::view).collect();
        let ctx = DecisionContext::new(self.tick, &self.grid, &self.food, &views);
        for &id in alive {
            if let Some(snake) = self.agents.get_mut(id.index()) {
                let direction = snake.decide(&ctx);
                tracing::trace!(
                    tick = self.tick,
                    agent = %id,
                    direction = ?direction,
                    plan = ?snake.plan_state(),
                    "decided"
                );
            }
        }
    }

    fn advance(&mut self, alive: &[AgentId]) {
        for &id in alive {
            let Some(snake) = self.agents.get_mut(id.index()) else { continue };
            let next = self.grid.neighbor(snake.head(), snake.direction());
            // Off-grid heads (bounded walls) hold no counter; the agent dies below.
            self.grid.add(next);
            let vacated = snake.advance(next);
            self.grid.remove(vacated);
        }
    }

    /// Cut lengths are all computed before any cut is applied.
    fn resolve_self_collisions(&mut self, alive: &[AgentId], sink: &mut dyn TraceSink) {
        let cuts: Vec<(AgentId, usize)> = alive
            .iter()
            .filter_map(|&id| {
                let snake = self.agents.get(id.index())?;
                let n = snake.self_cut_len(self.grid.obstacle_count(snake.head()));
                (n > 0).then_some((id, n))
            })
            .collect();

        for (id, n) in cuts {
            let Some(snake) = self.agents.get_mut(id.index()) else { continue };
            for cell in snake.cut(n) {
                self.grid.remove(cell);
            }
            tracing::trace!(tick = self.tick, agent = %id, len = n, "self collision cut");
            sink.emit(
                TraceEvent::new(self.tick, tags::AGENT_CUT)
                    .with_agent(id)
                    .with_cell(snake.head())
                    .with_value(n as i64),
            );
        }
    }

    /// Food under exactly one head is eaten; that agent grows by one segment.
    fn consume_food(&mut self, alive: &[AgentId], sink: &mut dyn TraceSink) -> usize {
        let heads: Vec<(AgentId, Cell)> = alive
            .iter()
            .filter_map(|&id| self.agents.get(id.index()).map(|s| (id, s.head())))
            .collect();

        let mut growing = Vec::new();
        for &(id, head) in &heads {
            let contenders = heads.iter().filter(|&&(_, h)| h == head).count();
            if contenders == 1 && self.food.remove(&head) {
                sink.emit(
                    TraceEvent::new(self.tick, tags::FOOD_CONSUMED)
                        .with_agent(id)
                        .with_cell(head),
                );
                growing.push(id);
            }
        }

        for &id in &growing {
            if let Some(snake) = self.agents.get_mut(id.index()) {
                let tail = snake.grow();
                self.grid.add(tail);
            }
        }
        growing.len()
    }

    /// An agent dies when its head left the grid or shares its cell with a
    /// segment that is not its own. Deaths are decided on the post-move
    /// snapshot, then applied together in a seeded random order.
    fn resolve_collisions(
        &mut self,
        alive: &[AgentId],
        ctx: &TickContext,
        sink: &mut dyn TraceSink,
    ) -> Vec<AgentId> {
        let mut deaths: Vec<(AgentId, Option<AgentId>)> = Vec::new();
        for &id in alive {
            let Some(snake) = self.agents.get(id.index()) else { continue };
            let head = snake.head();
            if !self.grid.contains(head) {
                deaths.push((id, None));
                continue;
            }
            if self.grid.obstacle_count(head) > snake.own_count(head) {
                let partner = alive.iter().copied().find(|&other| {
                    other != id
                        && self
                            .agents
                            .get(other.index())
                            .is_some_and(|s| s.body().contains(&head))
                });
                deaths.push((id, partner));
            }
        }

        ctx.rng_for_stream(DEATH_STREAM).shuffle(&mut deaths);

        for &(id, partner) in &deaths {
            let Some(snake) = self.agents.get_mut(id.index()) else { continue };
            let head = snake.head();
            for &cell in snake.kill() {
                self.grid.remove(cell);
            }
            self.roster.kill(id);
            tracing::debug!(tick = self.tick, agent = %id, partner = ?partner, cell = %head, "agent died");
            sink.emit(
                TraceEvent::new(self.tick, tags::AGENT_DIED)
                    .with_agent(id)
                    .with_cell(head)
                    .with_value(partner.map_or(-1, |p| i64::from(p.0))),
            );
        }
        deaths.into_iter().map(|(id, _)| id).collect()
    }

    fn restock<R: DeterministicRng>(&mut self, rng: &mut R, tick: u64, sink: &mut dyn TraceSink) {
        while self.food.len() < self.food_target {
            match sample_free_cell(&self.grid, rng, &self.food, self.food_tries) {
                Some(cell) => {
                    self.food.insert(cell);
                    sink.emit(TraceEvent::new(tick, tags::FOOD_SPAWNED).with_cell(cell));
                }
                None => {
                    tracing::warn!(
                        tick,
                        food = self.food.len(),
                        target = self.food_target,
                        "no free cell for food, restock skipped"
                    );
                    break;
                }
            }
        }
    }

    /// Cell furthest from every alive body (and from the edge midpoints while
    /// two agents or fewer are alive), if it is free.
    pub fn spawn_cell(&self) -> Option<Cell> {
        let mut repellents: Vec<Cell> = self
            .roster
            .alive()
            .iter()
            .filter_map(|id| self.agents.get(id.index()))
            .flat_map(|snake| snake.body().iter().copied())
            .collect();
        if self.roster.alive_len() <= 2 {
            repellents.extend(edge_midpoints(&self.grid));
        }
        let (cell, _) = furthest_cell(&self.grid, &repellents)?;
        self.grid.is_free(cell).then_some(cell)
    }

    fn respawn(&mut self, sink: &mut dyn TraceSink) -> Option<AgentId> {
        if self.roster.dead_len() == 0 {
            return None;
        }
        let initial = self.respawn_cooldown?;
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        let Some(cell) = self.spawn_cell() else {
            tracing::warn!(tick = self.tick, "spawn cell occupied, respawn skipped");
            return None;
        };
        let id = self.roster.revive_next()?;
        let direction = toward_center(cell, self.grid.width(), self.grid.height());
        let snake = self.agents.get_mut(id.index())?;
        snake.respawn(cell, direction);
        for _ in 0..snake.len() {
            self.grid.add(cell);
        }
        self.cooldown = initial;

        tracing::debug!(tick = self.tick, agent = %id, cell = %cell, direction = ?direction, "agent respawned");
        sink.emit(
            TraceEvent::new(self.tick, tags::AGENT_RESPAWNED)
                .with_agent(id)
                .with_cell(cell),
        );
        Some(id)
    }

    /// Puts a manual obstacle on `cell`.
    pub fn add_obstacle(&mut self, cell: Cell) -> Result<()> {
        self.grid.check(cell)?;
        self.grid.add(cell);
        Ok(())
    }

    /// Takes one obstacle off `cell`. Returns `false` if the cell was free.
    pub fn discard_obstacle(&mut self, cell: Cell) -> bool {
        self.grid.remove(cell)
    }

    /// Places food on `cell` by hand. Returns `false` when the cell is
    /// occupied, already holds food, or the food target is reached.
    pub fn place_food(&mut self, cell: Cell) -> Result<bool> {
        self.grid.check(cell)?;
        if self.food.len() >= self.food_target || !self.grid.is_free(cell) {
            return Ok(false);
        }
        Ok(self.food.insert(cell))
    }

    /// Queues a player move for `id`. Returns whether it was accepted.
    pub fn add_request(&mut self, id: AgentId, direction: Direction) -> Result<bool> {
        Ok(self.agent_mut(id)?.request(direction))
    }

    /// Registers `opponent` as a target of the offensive agent `id`.
    pub fn add_opponent(&mut self, id: AgentId, opponent: AgentId) -> Result<bool> {
        if self.agents.get(opponent.index()).is_none() {
            return Err(WorldError::UnknownAgent(opponent));
        }
        Ok(self.agent_mut(id)?.add_opponent(opponent))
    }

    fn agent_mut(&mut self, id: AgentId) -> Result<&mut Snake> {
        self.agents
            .get_mut(id.index())
            .ok_or(WorldError::UnknownAgent(id))
    }

    pub fn agent(&self, id: AgentId) -> Option<&Snake> {
        self.agents.get(id.index())
    }

    /// Every attached agent, in attach order.
    pub fn agents(&self) -> &[Snake] {
        &self.agents
    }

    pub fn alive_agents(&self) -> impl Iterator<Item = &Snake> + '_ {
        self.roster
            .alive()
            .iter()
            .filter_map(|id| self.agents.get(id.index()))
    }

    /// Dead agents, next to respawn first.
    pub fn dead_agents(&self) -> impl Iterator<Item = &Snake> + '_ {
        self.roster
            .dead()
            .filter_map(|id| self.agents.get(id.index()))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn food(&self) -> &BTreeSet<Cell> {
        &self.food
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    /// Food eaten by each agent since the last reset, in attach order.
    pub fn scores(&self) -> Vec<(AgentId, u64)> {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, snake)| (AgentId(i as u32), snake.eaten()))
            .collect()
    }

    /// Number of ticks simulated since the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks left before the next respawn attempt.
    pub fn respawn_cooldown(&self) -> Option<u32> {
        self.respawn_cooldown.map(|_| self.cooldown)
    }
}
