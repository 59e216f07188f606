//! Instruction Disassembler.
//!
//! Converts an 18-bit instruction word into the assembly syntax of the
//! machine for debug tracing, the CLI listing, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use vnsim_core::common::Word;
//! use vnsim_core::isa::disasm::disassemble;
//!
//! assert_eq!(disassemble(Word::new(0o014407)), "LDR 1,2,7");
//! assert_eq!(disassemble(Word::new(0o014607)), "LDR 1,2,7,I");
//! ```

use crate::common::Word;
use crate::isa::instruction::{InstructionBits, InstructionClass};
use crate::isa::opcodes::Opcode;

/// Disassembles one instruction word.
///
/// Words whose opcode is not recognised are rendered as `DATA` followed by
/// the octal value.
pub fn disassemble(word: Word) -> String {
    let Some(op) = Opcode::from_bits(word.opcode()) else {
        return format!("DATA {word}");
    };
    let m = op.mnemonic();
    let ind = if word.indirect() { ",I" } else { "" };

    match op.class() {
        InstructionClass::Halt => m.to_string(),
        InstructionClass::Trap => format!("{m} {}", word.trap_code()),
        InstructionClass::RegisterRegister => match op {
            Opcode::Not => format!("{m} {}", word.rx()),
            _ => format!("{m} {},{}", word.rx(), word.ry()),
        },
        InstructionClass::ShiftRotate => format!(
            "{m} {},{},{},{}",
            word.r(),
            word.count(),
            word.lr(),
            word.al()
        ),
        InstructionClass::Io => format!("{m} {},{}", word.r(), word.dev_id()),
        InstructionClass::LoadStore => match op {
            Opcode::Air | Opcode::Sir => format!("{m} {},{}", word.r(), word.address()),
            Opcode::Rfs => format!("{m} {}", word.address()),
            Opcode::Jmp | Opcode::Jsr | Opcode::Ldx | Opcode::Stx => {
                format!("{m} {},{}{ind}", word.ix(), word.address())
            }
            _ => format!("{m} {},{},{}{ind}", word.r(), word.ix(), word.address()),
        },
        InstructionClass::Illegal => format!("DATA {word}"),
    }
}
