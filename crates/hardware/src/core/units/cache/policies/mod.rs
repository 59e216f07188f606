//! Cache Eviction Policies.
//!
//! Implements the algorithms that propose a victim slot when the cache is full.
//! The cache itself rejects dirty proposals and asks again, so a policy only
//! has to keep proposing.
//!
//! # Policies
//!
//! - `Random`: Uniform random slot.
//! - `Fifo`: Round-robin over the slots.

/// First-In, First-Out (round-robin) eviction policy.
pub mod fifo;

/// Random eviction policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use random::RandomPolicy;

/// Trait for cache eviction policies.
///
/// Implementors must be `Send` because the cache lives behind the memory
/// lock shared with the controller thread.
pub trait EvictionPolicy: Send {
    /// Records that a line was installed in `slot`.
    fn update(&mut self, slot: usize);

    /// Proposes a slot to evict. Successive calls should eventually cover
    /// every slot so that a clean line is found if one exists.
    fn get_victim(&mut self) -> usize;
}
