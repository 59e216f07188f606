//! Core processor implementation.
//!
//! This module contains the execution engine and the functional units it
//! drives: the ALU and the L1 cache.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU, cache).
pub mod units;

pub use self::cpu::Cpu;
