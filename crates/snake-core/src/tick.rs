use crate::{rng, SplitMix64};

/// Per-tick context handed to every phase of a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self { tick, seed }
    }

    /// RNG stream shared by world-level phases (food, death ordering) for this tick.
    pub fn rng_for_stream(&self, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::derive_seed(self.seed, self.tick, stream))
    }
}
