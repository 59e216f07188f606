//! Teaching simulator of an 18-bit von-Neumann processor.
//!
//! This crate implements a micro-stepped simulator with the following:
//! 1. **Core:** Register file, a fetch/decode/execute micro-step engine, and the ALU.
//! 2. **Memory:** A set-less write-through L1 cache, a bounded write buffer, and a
//!    memory controller that drains it on its own thread.
//! 3. **ISA:** Decoding of the six instruction layouts and a disassembler.
//! 4. **SoC:** Keyboard and printer devices and the front-panel observer trait.
//! 5. **Simulation:** Program image loader, configuration, and statistics collection.

/// Common types and constants (words, registers, errors, access types).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (micro-step engine, ALU, cache).
pub mod core;
/// Instruction set (opcodes, field layouts, decode, disassembly).
pub mod isa;
/// Program loader and the simulator facade.
pub mod sim;
/// System components (memory subsystem, devices, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Execution engine; holds registers, the memory handle and the panel.
pub use crate::core::Cpu;
/// Engine plus memory controller thread.
pub use crate::sim::Simulator;
/// Shared handle to the cache, write buffer and main memory.
pub use crate::soc::Memory;
