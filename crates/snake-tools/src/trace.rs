#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use snake_core::{AgentId, Cell};

/// Tags emitted by the world during a tick.
pub mod tags {
    pub const FOOD_CONSUMED: &str = "food_consumed";
    pub const FOOD_SPAWNED: &str = "food_spawned";
    pub const AGENT_CUT: &str = "agent_cut";
    pub const AGENT_DIED: &str = "agent_died";
    pub const AGENT_RESPAWNED: &str = "agent_respawned";
}

/// A small trace event.
///
/// Deliberately "dumb data" so it can be recorded during simulation and
/// rendered later by tooling. `value` carries a tag-specific number (cut
/// length, id of the agent collided with, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub agent: Option<AgentId>,
    pub cell: Option<Cell>,
    pub value: i64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            agent: None,
            cell: None,
            value: 0,
        }
    }

    pub fn with_agent(mut self, agent: AgentId) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl VecTraceSink {
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Forwards every event to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        tracing::debug!(
            tick = event.tick,
            tag = %event.tag,
            agent = ?event.agent,
            cell = ?event.cell,
            value = event.value,
            "trace"
        );
    }
}

/// Owned event history, e.g. for replay files.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
