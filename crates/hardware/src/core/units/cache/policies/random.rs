//! Random Eviction Policy.
//!
//! This policy proposes a uniformly random slot. It uses a xorshift generator
//! so runs are reproducible from the configured seed.

use super::EvictionPolicy;

/// Random policy state.
#[derive(Debug)]
pub struct RandomPolicy {
    /// Number of slots in the cache.
    slots: usize,
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new random policy.
    ///
    /// # Arguments
    ///
    /// * `slots` - Number of cache slots to choose from.
    /// * `seed` - Generator seed; zero is replaced because xorshift would stick at zero.
    pub fn new(slots: usize, seed: u64) -> Self {
        Self {
            slots: slots.max(1),
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }
}

impl EvictionPolicy for RandomPolicy {
    /// Installation order does not matter for random selection.
    fn update(&mut self, _slot: usize) {}

    fn get_victim(&mut self) -> usize {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % self.slots as u64) as usize
    }
}
