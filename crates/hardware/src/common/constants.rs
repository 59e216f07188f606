//! Global Machine Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Word Constants:** Width and mask of the 18-bit machine word.
//! 2. **Reserved Locations:** Low-memory addresses used by the trap and fault sequences.
//! 3. **Device Identifiers:** Device numbers understood by `IN`, `OUT` and `CHK`.
//! 4. **Memory Hierarchy Defaults:** Cache geometry and write buffer depth.

/// Width of a machine word in bits.
pub const WORD_BITS: u32 = 18;

/// Mask selecting the low 18 bits of a host integer.
pub const WORD_MASK: u32 = (1 << WORD_BITS) - 1;

/// Mask selecting the sign bit (bit 0, the most significant bit) of a word.
pub const WORD_SIGN_BIT: u32 = 1 << (WORD_BITS - 1);

/// Width of an address register (PC, MAR, EA) in bits.
pub const ADDRESS_BITS: u32 = 12;

/// Reserved location holding the base address of the trap routine table.
pub const TRAP_TABLE_ADDR: usize = 0;

/// Reserved location holding the machine fault handler address.
pub const FAULT_HANDLER_ADDR: usize = 1;

/// Reserved location receiving `PC + 1` when a `TRAP` executes.
pub const TRAP_RETURN_ADDR: usize = 2;

/// Reserved location receiving the PC when a machine fault is taken.
pub const FAULT_PC_ADDR: usize = 4;

/// Reserved location receiving the MSR when a machine fault is taken.
pub const FAULT_MSR_ADDR: usize = 5;

/// Number of entries in the trap routine table; larger trap codes fault.
pub const TRAP_TABLE_ENTRIES: u32 = 16;

/// Keyboard device number (input).
pub const DEV_KEYBOARD: u32 = 0;

/// Printer device number (output to the terminal).
pub const DEV_PRINTER: u32 = 1;

/// Default number of words in main memory.
pub const DEFAULT_MEMORY_WORDS: usize = 2048;

/// Default address the program counter is set to on IPL.
pub const DEFAULT_BOOT_ADDRESS: u32 = 0o10;

/// Number of line slots in the L1 cache.
pub const CACHE_LINES: usize = 16;

/// Number of words in one cache line.
pub const CACHE_LINE_WORDS: usize = 6;

/// Write buffer depth (entries).
pub const WRITE_BUFFER_CAPACITY: usize = 4;

/// Default bound on victim selection retries before eviction is reported as livelocked.
pub const MAX_EVICTION_ATTEMPTS: usize = 64;

/// First micro-step of the opcode-specific tail (steps 0-3 are fetch and decode).
pub const EXECUTE_STEP: u8 = 4;
