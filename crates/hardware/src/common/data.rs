//! Memory Access Types.
//!
//! This module defines the classification of memory accesses issued by the engine.
//! These types are used for the following:
//! 1. **Statistics Tracking:** Separating instruction fetches from operand traffic.
//! 2. **Tracing:** Labelling cache hits and misses in the debug log.

/// Type of memory access operation.
///
/// Used to distinguish instruction fetches, operand loads and operand stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access (micro-step 1).
    Fetch,

    /// Operand read access (loads, indirect address fetches).
    Read,

    /// Operand write access (stores and reserved-location updates).
    Write,
}

impl AccessType {
    /// Short lowercase label used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}
