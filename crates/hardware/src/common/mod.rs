//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Word Type:** The 18-bit machine word.
//! 2. **Constants:** Machine-wide widths, reserved locations and memory geometry.
//! 3. **Memory Access:** Classification of memory operations (Fetch/Read/Write).
//! 4. **Error Handling:** Fatal simulator errors and recoverable machine faults.
//! 5. **Register Management:** Fixed-width registers and the enum-indexed register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and machine fault definitions.
pub mod error;

/// Register and register file implementation.
pub mod reg;

/// The 18-bit machine word.
pub mod word;

pub use data::AccessType;
pub use error::{MachineFault, Result, SimError};
pub use reg::{RegName, Register, RegisterFile};
pub use word::Word;
