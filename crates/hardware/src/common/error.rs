//! Error and Machine Fault definitions.
//!
//! This module defines the error handling and fault mechanisms for the simulator. It provides:
//! 1. **Fatal Errors:** Conditions surfaced to the caller of the engine (`SimError`).
//! 2. **Machine Faults:** Recoverable conditions the engine handles in-band by vectoring
//!    to the fault handler (`MachineFault`).
//! 3. **Error Handling:** Integration with standard Rust error traits through `thiserror`.

use thiserror::Error;

/// Errors surfaced to the caller of the simulator.
///
/// None of these are recoverable by the simulated machine itself; illegal
/// instructions are expressed as [`MachineFault`] instead and never reach here.
#[derive(Debug, Error)]
pub enum SimError {
    /// A memory access named an address outside the word store.
    #[error("address {address} (octal {address:o}) is outside memory of {limit} words")]
    AddressOutOfRange {
        /// The offending address.
        address: usize,
        /// Number of words in the store.
        limit: usize,
    },

    /// No clean cache line could be found to evict.
    #[error("cache eviction gave up after {attempts} attempts: every candidate line was dirty")]
    EvictionLivelock {
        /// Number of victim selections tried before giving up.
        attempts: usize,
    },

    /// A write needed buffer space but the memory controller is no longer draining.
    #[error("write buffer is full and the memory controller has stopped")]
    ControllerStopped,

    /// A program image line could not be parsed.
    #[error("program image line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Reading a program image or configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Machine fault classes, recorded in the machine fault register (MFR).
///
/// Bit numbering follows the rest of the machine: bit 0 is the most
/// significant bit of the 4-bit MFR. Bits 0 and 3 stay clear: out-of-range
/// addresses surface as [`SimError::AddressOutOfRange`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MachineFault {
    /// `TRAP` with a code outside the trap table.
    #[error("illegal trap code")]
    IllegalTrapCode,

    /// Opcode with no decoder class, or an operand combination the opcode forbids.
    #[error("illegal operation code")]
    IllegalOpcode,
}

impl MachineFault {
    /// MFR bit index (0 = most significant) for this fault.
    pub const fn mfr_bit(self) -> u32 {
        match self {
            Self::IllegalTrapCode => 1,
            Self::IllegalOpcode => 2,
        }
    }
}
