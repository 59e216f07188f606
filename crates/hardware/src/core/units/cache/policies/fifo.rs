//! First-In, First-Out (FIFO) Eviction Policy.
//!
//! Proposes slots in round-robin order. Because the pointer advances on every
//! proposal, a rejected dirty slot is skipped and the next one is offered, so
//! a full sweep visits every slot once.

use super::EvictionPolicy;

/// FIFO policy state.
#[derive(Debug)]
pub struct FifoPolicy {
    /// Next slot to propose.
    next: usize,
    /// Number of slots in the cache.
    slots: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy over `slots` slots.
    pub fn new(slots: usize) -> Self {
        Self {
            next: 0,
            slots: slots.max(1),
        }
    }
}

impl EvictionPolicy for FifoPolicy {
    /// Slots fill in order, so installation needs no bookkeeping.
    fn update(&mut self, _slot: usize) {}

    fn get_victim(&mut self) -> usize {
        let victim = self.next;
        self.next = (self.next + 1) % self.slots;
        victim
    }
}
