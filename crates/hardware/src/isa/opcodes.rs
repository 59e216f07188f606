//! Opcode table.
//!
//! Defines the 6-bit operation codes and maps each to its instruction class.

use super::instruction::InstructionClass;

/// Every opcode the decoder recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Halt the machine.
    Hlt = 0,
    /// Load register from memory.
    Ldr = 1,
    /// Store register to memory.
    Str = 2,
    /// Load register from the effective address.
    Lda = 3,
    /// Add memory to register.
    Amr = 4,
    /// Subtract memory from register.
    Smr = 5,
    /// Add immediate to register.
    Air = 6,
    /// Subtract immediate from register.
    Sir = 7,
    /// Jump if zero.
    Jz = 8,
    /// Jump if not equal (non-zero).
    Jne = 9,
    /// Jump if condition code bit set.
    Jcc = 10,
    /// Unconditional jump.
    Jmp = 11,
    /// Jump and save return address.
    Jsr = 12,
    /// Return from subroutine.
    Rfs = 13,
    /// Subtract one and branch.
    Sob = 14,
    /// Jump if greater than or equal to zero.
    Jge = 15,
    /// Multiply register by register.
    Mlt = 16,
    /// Divide register by register.
    Dvd = 17,
    /// Test equality of two registers.
    Trr = 18,
    /// Bitwise AND of two registers.
    And = 19,
    /// Bitwise OR of two registers.
    Orr = 20,
    /// Bitwise NOT of a register.
    Not = 21,
    /// Software trap.
    Trap = 24,
    /// Shift register by count.
    Src = 25,
    /// Rotate register by count.
    Rrc = 26,
    /// Floating add (recognised, not executed).
    Fadd = 27,
    /// Floating subtract (recognised, not executed).
    Fsub = 28,
    /// Vector add (recognised, not executed).
    Vadd = 29,
    /// Vector subtract (recognised, not executed).
    Vsub = 30,
    /// Convert to fixed/floating (recognised, not executed).
    Cnvrt = 31,
    /// Load index register from memory.
    Ldx = 33,
    /// Store index register to memory.
    Stx = 34,
    /// Load floating register (recognised, not executed).
    Ldfr = 40,
    /// Store floating register (recognised, not executed).
    Stfr = 41,
    /// Input character from device.
    In = 49,
    /// Output character to device.
    Out = 50,
    /// Check device status.
    Chk = 51,
}

impl Opcode {
    /// Looks up a raw 6-bit opcode; `None` for codes with no instruction.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0 => Self::Hlt,
            1 => Self::Ldr,
            2 => Self::Str,
            3 => Self::Lda,
            4 => Self::Amr,
            5 => Self::Smr,
            6 => Self::Air,
            7 => Self::Sir,
            8 => Self::Jz,
            9 => Self::Jne,
            10 => Self::Jcc,
            11 => Self::Jmp,
            12 => Self::Jsr,
            13 => Self::Rfs,
            14 => Self::Sob,
            15 => Self::Jge,
            16 => Self::Mlt,
            17 => Self::Dvd,
            18 => Self::Trr,
            19 => Self::And,
            20 => Self::Orr,
            21 => Self::Not,
            24 => Self::Trap,
            25 => Self::Src,
            26 => Self::Rrc,
            27 => Self::Fadd,
            28 => Self::Fsub,
            29 => Self::Vadd,
            30 => Self::Vsub,
            31 => Self::Cnvrt,
            33 => Self::Ldx,
            34 => Self::Stx,
            40 => Self::Ldfr,
            41 => Self::Stfr,
            49 => Self::In,
            50 => Self::Out,
            51 => Self::Chk,
            _ => return None,
        })
    }

    /// Raw 6-bit encoding.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => "HLT",
            Self::Ldr => "LDR",
            Self::Str => "STR",
            Self::Lda => "LDA",
            Self::Amr => "AMR",
            Self::Smr => "SMR",
            Self::Air => "AIR",
            Self::Sir => "SIR",
            Self::Jz => "JZ",
            Self::Jne => "JNE",
            Self::Jcc => "JCC",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Rfs => "RFS",
            Self::Sob => "SOB",
            Self::Jge => "JGE",
            Self::Mlt => "MLT",
            Self::Dvd => "DVD",
            Self::Trr => "TRR",
            Self::And => "AND",
            Self::Orr => "ORR",
            Self::Not => "NOT",
            Self::Trap => "TRAP",
            Self::Src => "SRC",
            Self::Rrc => "RRC",
            Self::Fadd => "FADD",
            Self::Fsub => "FSUB",
            Self::Vadd => "VADD",
            Self::Vsub => "VSUB",
            Self::Cnvrt => "CNVRT",
            Self::Ldx => "LDX",
            Self::Stx => "STX",
            Self::Ldfr => "LDFR",
            Self::Stfr => "STFR",
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Chk => "CHK",
        }
    }

    /// Field layout class of the opcode.
    pub const fn class(self) -> InstructionClass {
        match self {
            Self::Hlt => InstructionClass::Halt,
            Self::Trap => InstructionClass::Trap,
            Self::Mlt
            | Self::Dvd
            | Self::Trr
            | Self::And
            | Self::Orr
            | Self::Not => InstructionClass::RegisterRegister,
            Self::Src | Self::Rrc => InstructionClass::ShiftRotate,
            Self::In | Self::Out | Self::Chk => InstructionClass::Io,
            _ => InstructionClass::LoadStore,
        }
    }

    /// True for the floating point and vector opcodes whose execution is not modelled.
    pub const fn is_unimplemented(self) -> bool {
        matches!(
            self,
            Self::Fadd
                | Self::Fsub
                | Self::Vadd
                | Self::Vsub
                | Self::Cnvrt
                | Self::Ldfr
                | Self::Stfr
        )
    }
}
