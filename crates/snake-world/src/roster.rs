use std::collections::VecDeque;

use snake_core::AgentId;

/// The two ownership buckets of a world's agents.
///
/// An agent is either alive or waiting in the dead queue, never both. The
/// dead queue is FIFO: the agent that died first respawns first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    alive: Vec<AgentId>,
    dead: VecDeque<AgentId>,
}

impl Roster {
    /// Adds a newly attached agent to the bucket matching its state.
    pub fn enlist(&mut self, id: AgentId, alive: bool) {
        if alive {
            self.alive.push(id);
        } else {
            self.dead.push_back(id);
        }
    }

    pub fn alive(&self) -> &[AgentId] {
        &self.alive
    }

    /// Dead agents, longest-waiting first.
    pub fn dead(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.dead.iter().copied()
    }

    pub fn alive_len(&self) -> usize {
        self.alive.len()
    }

    pub fn dead_len(&self) -> usize {
        self.dead.len()
    }

    pub fn len(&self) -> usize {
        self.alive.len() + self.dead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.alive.contains(&id)
    }

    /// Moves `id` from the alive list to the back of the dead queue.
    pub fn kill(&mut self, id: AgentId) -> bool {
        match self.alive.iter().position(|&a| a == id) {
            Some(pos) => {
                self.alive.remove(pos);
                self.dead.push_back(id);
                true
            }
            None => false,
        }
    }

    /// Pops the longest-waiting dead agent and appends it to the alive list.
    pub fn revive_next(&mut self) -> Option<AgentId> {
        let id = self.dead.pop_front()?;
        self.alive.push(id);
        Some(id)
    }
}
