//! Execution units and functional components.
//!
//! This module contains the integer ALU and the set-less L1 cache with its
//! eviction policies.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// L1 cache with pluggable eviction policies.
pub mod cache;
