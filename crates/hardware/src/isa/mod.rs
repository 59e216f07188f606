//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the field layouts of the six instruction
//! classes, the decoder, and a disassembler.

/// Instruction decoding into field assignments.
pub mod decode;

/// Instruction disassembler for debug tracing and listings.
pub mod disasm;

/// Field bit ranges, layouts and bit extraction utilities.
pub mod instruction;

/// Opcode enumeration and class mapping.
pub mod opcodes;

pub use decode::{Decoded, decode};
pub use instruction::InstructionClass;
pub use opcodes::Opcode;
