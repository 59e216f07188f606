//! System components around the core.
//!
//! This module organizes the parts of the machine outside the execution
//! engine: the memory subsystem with its controller thread, the character
//! devices, and the collaborator traits the engine talks through.

/// Keyboard and printer.
pub mod devices;

/// Word store, write buffer, memory controller and the `Memory` handle.
pub mod memory;

/// `FrontPanel` and `Device` traits.
pub mod traits;

pub use memory::{Memory, MemoryController};
pub use traits::{Device, FrontPanel, NullPanel};
