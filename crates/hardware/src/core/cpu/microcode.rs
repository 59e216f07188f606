//! Micro-programs.
//!
//! The execute phase of every opcode is a short, fixed sequence of
//! micro-operations. Steps 0-3 (fetch and decode) are common to all
//! instructions; from step 4 on the engine interprets
//! `program(opcode)[prog_step - 4]` and returns to step 0 after the last entry.

use crate::core::units::alu::AluOp;
use crate::isa::opcodes::Opcode;

/// Register addressed through a decoded field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// General purpose register selected by the R field.
    Gpr,
    /// General purpose register selected by the RX field.
    Rx,
    /// Index register selected by the IX field.
    Index,
}

/// Condition tested by a branch micro-operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCondition {
    /// Taken unconditionally.
    Always,
    /// `c(R) == 0`.
    Zero,
    /// `c(R) != 0`.
    NonZero,
    /// CC bit selected by the R field is set.
    CcSet,
    /// `c(R) >= 0` as a signed word.
    NonNegative,
    /// `c(R) > 0` as a signed word.
    Positive,
}

/// One execute-phase micro-operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MicroOp {
    /// EA from ADDR, IX and I. `indexed` is false for LDX/STX, whose IX
    /// field names the register instead of an offset.
    EffectiveAddress {
        /// Add the selected index register.
        indexed: bool,
    },
    /// MAR <- EA.
    EaToMar,
    /// MDR <- M[MAR] through the cache.
    Load,
    /// M[MAR] <- MDR through the cache and write buffer.
    Store,
    /// Target <- MDR.
    MdrTo(Target),
    /// MDR <- target.
    ToMdr(Target),
    /// OP1 <- c(R), OP2 <- MDR.
    StageMemOperand,
    /// OP1 <- c(R), OP2 <- ADDR.
    StageImmediate,
    /// OP1 <- c(R), OP2 <- 1.
    StageDecrement,
    /// OP1 <- c(RX), OP2 <- c(RY).
    StageRegisterPair,
    /// OP1 <- c(R), OP2 <- COUNT, OP3 <- LR, OP4 <- AL.
    StageShift,
    /// Fault unless RX and RY both select R0 or R2.
    CheckRegisterPair,
    /// RESULT <- ALU(op), updating CC.
    Alu(AluOp),
    /// Target <- RESULT, skipped when the ALU produced no result.
    WriteBack(Target),
    /// RX, RX+1 <- RESULT pair, skipped when the ALU produced no result.
    WriteBackPair,
    /// PC <- EA when the condition holds.
    Branch(BranchCondition),
    /// R3 <- PC + 1.
    SaveReturn,
    /// R0 <- ADDR, PC <- c(R3).
    Return,
    /// R <- next character from DEVID.
    Input,
    /// DEVID <- low 8 bits of c(R).
    Output,
    /// R <- device status.
    Check,
    /// Stop the machine.
    Halt,
    /// Software trap through the trap table.
    Trap,
    /// Illegal opcode fault.
    Fault,
    /// Recognised opcode with no modelled behaviour.
    Unimplemented,
}

use BranchCondition as Cond;
use MicroOp::{
    Alu, Branch, CheckRegisterPair, EaToMar, EffectiveAddress, Load, MdrTo, SaveReturn,
    StageDecrement, StageImmediate, StageMemOperand, StageRegisterPair, StageShift, Store, ToMdr,
    WriteBack, WriteBackPair,
};

const INDEXED: MicroOp = EffectiveAddress { indexed: true };
const UNINDEXED: MicroOp = EffectiveAddress { indexed: false };

const LDR: &[MicroOp] = &[INDEXED, EaToMar, Load, MdrTo(Target::Gpr)];
const STR: &[MicroOp] = &[INDEXED, EaToMar, ToMdr(Target::Gpr), Store];
const LDA: &[MicroOp] = &[INDEXED, EaToMar, Load, MdrTo(Target::Gpr)];
const LDX: &[MicroOp] = &[UNINDEXED, EaToMar, Load, MdrTo(Target::Index)];
const STX: &[MicroOp] = &[UNINDEXED, EaToMar, ToMdr(Target::Index), Store];

const AMR: &[MicroOp] = &[
    INDEXED,
    EaToMar,
    Load,
    StageMemOperand,
    Alu(AluOp::Add),
    WriteBack(Target::Gpr),
];
const SMR: &[MicroOp] = &[
    INDEXED,
    EaToMar,
    Load,
    StageMemOperand,
    Alu(AluOp::Sub),
    WriteBack(Target::Gpr),
];
const AIR: &[MicroOp] = &[StageImmediate, Alu(AluOp::Add), WriteBack(Target::Gpr)];
const SIR: &[MicroOp] = &[StageImmediate, Alu(AluOp::Sub), WriteBack(Target::Gpr)];

const JZ: &[MicroOp] = &[INDEXED, Branch(Cond::Zero)];
const JNE: &[MicroOp] = &[INDEXED, Branch(Cond::NonZero)];
const JCC: &[MicroOp] = &[INDEXED, Branch(Cond::CcSet)];
const JMP: &[MicroOp] = &[INDEXED, Branch(Cond::Always)];
const JSR: &[MicroOp] = &[INDEXED, SaveReturn, Branch(Cond::Always)];
const RFS: &[MicroOp] = &[MicroOp::Return];
const SOB: &[MicroOp] = &[
    INDEXED,
    StageDecrement,
    Alu(AluOp::Sub),
    WriteBack(Target::Gpr),
    Branch(Cond::Positive),
];
const JGE: &[MicroOp] = &[INDEXED, Branch(Cond::NonNegative)];

const MLT: &[MicroOp] = &[
    CheckRegisterPair,
    StageRegisterPair,
    Alu(AluOp::Mul),
    WriteBackPair,
];
const DVD: &[MicroOp] = &[
    CheckRegisterPair,
    StageRegisterPair,
    Alu(AluOp::Div),
    WriteBackPair,
];
const TRR: &[MicroOp] = &[StageRegisterPair, Alu(AluOp::Compare)];
const AND: &[MicroOp] = &[StageRegisterPair, Alu(AluOp::And), WriteBack(Target::Rx)];
const ORR: &[MicroOp] = &[StageRegisterPair, Alu(AluOp::Or), WriteBack(Target::Rx)];
const NOT: &[MicroOp] = &[StageRegisterPair, Alu(AluOp::Not), WriteBack(Target::Rx)];

const SRC: &[MicroOp] = &[StageShift, Alu(AluOp::Shift), WriteBack(Target::Gpr)];
const RRC: &[MicroOp] = &[StageShift, Alu(AluOp::Rotate), WriteBack(Target::Gpr)];

const HLT: &[MicroOp] = &[MicroOp::Halt];
const TRAP: &[MicroOp] = &[MicroOp::Trap];
const IN: &[MicroOp] = &[MicroOp::Input];
const OUT: &[MicroOp] = &[MicroOp::Output];
const CHK: &[MicroOp] = &[MicroOp::Check];
const UNIMPLEMENTED: &[MicroOp] = &[MicroOp::Unimplemented];
const ILLEGAL: &[MicroOp] = &[MicroOp::Fault];

/// Execute-phase micro-program for an opcode; `None` selects the illegal-opcode fault.
pub const fn program(opcode: Option<Opcode>) -> &'static [MicroOp] {
    let Some(op) = opcode else {
        return ILLEGAL;
    };
    match op {
        Opcode::Hlt => HLT,
        Opcode::Ldr => LDR,
        Opcode::Str => STR,
        Opcode::Lda => LDA,
        Opcode::Amr => AMR,
        Opcode::Smr => SMR,
        Opcode::Air => AIR,
        Opcode::Sir => SIR,
        Opcode::Jz => JZ,
        Opcode::Jne => JNE,
        Opcode::Jcc => JCC,
        Opcode::Jmp => JMP,
        Opcode::Jsr => JSR,
        Opcode::Rfs => RFS,
        Opcode::Sob => SOB,
        Opcode::Jge => JGE,
        Opcode::Mlt => MLT,
        Opcode::Dvd => DVD,
        Opcode::Trr => TRR,
        Opcode::And => AND,
        Opcode::Orr => ORR,
        Opcode::Not => NOT,
        Opcode::Trap => TRAP,
        Opcode::Src => SRC,
        Opcode::Rrc => RRC,
        Opcode::Ldx => LDX,
        Opcode::Stx => STX,
        Opcode::In => IN,
        Opcode::Out => OUT,
        Opcode::Chk => CHK,
        Opcode::Fadd
        | Opcode::Fsub
        | Opcode::Vadd
        | Opcode::Vsub
        | Opcode::Cnvrt
        | Opcode::Ldfr
        | Opcode::Stfr => UNIMPLEMENTED,
    }
}
