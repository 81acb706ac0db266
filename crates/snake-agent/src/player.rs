use std::collections::VecDeque;

use snake_core::Direction;
use snake_grid::GridGraph;

use crate::{DecisionContext, Policy, SelfView};

/// Maximum number of queued direction requests.
pub const REQUEST_DEPTH: usize = 5;

/// Agent driven by queued input requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerController {
    requests: VecDeque<Direction>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `request`, given the agent's `current` heading.
    ///
    /// Silently dropped (returns `false`) when the buffer is full or when it
    /// would reverse the last queued heading.
    pub fn request(&mut self, request: Direction, current: Direction) -> bool {
        if self.requests.len() >= REQUEST_DEPTH {
            return false;
        }
        let last = self.requests.back().copied().unwrap_or(current);
        if request == last.opposite() {
            return false;
        }
        self.requests.push_back(request);
        true
    }

    pub fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.requests.iter().copied()
    }
}

impl Policy for PlayerController {
    fn decide<G: GridGraph>(&mut self, _ctx: &DecisionContext<'_, G>, me: &SelfView) -> Direction {
        self.requests.pop_front().unwrap_or(me.direction)
    }

    fn reset(&mut self) {
        self.requests.clear();
    }
}
