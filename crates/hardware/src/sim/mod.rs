//! Simulation utilities and program loading.
//!
//! Provides the program image loader and the `Simulator` facade that ties
//! the engine to its memory controller thread.

/// Program image parsing and loading.
pub mod loader;

/// Engine plus controller lifecycle.
pub mod simulator;

pub use simulator::Simulator;
