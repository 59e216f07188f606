//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU driven by the execute micro-steps.
//! Every operation works on 18-bit unsigned words and reports at most one
//! condition code update; the engine applies it to CC.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div
//! - [`logic`]:      And, Or, Not, equality test
//! - [`shifts`]:     Shift, Rotate

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift and rotate operations.
pub mod shifts;

/// Condition code bits; bit 0 is the most significant bit of CC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionCode {
    /// Unsigned addition carried out of bit 0.
    Overflow,
    /// Unsigned subtraction borrowed.
    Underflow,
    /// Division by zero.
    DivideByZero,
    /// Equality test result.
    EqualOrNot,
}

impl ConditionCode {
    /// CC bit index of this condition.
    pub const fn bit(self) -> u32 {
        match self {
            Self::Overflow => 0,
            Self::Underflow => 1,
            Self::DivideByZero => 2,
            Self::EqualOrNot => 3,
        }
    }
}

/// Change an operation makes to the condition code register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CcUpdate {
    /// Set one bit, leaving the others.
    Set(ConditionCode),
    /// Clear one bit, leaving the others.
    Clear(ConditionCode),
}

/// ALU operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// `OP1 + OP2`.
    Add,
    /// `OP1 - OP2`.
    Sub,
    /// `OP1 * OP2` as a (high, low) pair.
    Mul,
    /// `OP1 / OP2` as a (quotient, remainder) pair.
    Div,
    /// Equality of `OP1` and `OP2` into the CC equal bit.
    Compare,
    /// `OP1 & OP2`.
    And,
    /// `OP1 | OP2`.
    Or,
    /// `!OP1`.
    Not,
    /// Shift `OP1` by `OP2`; `OP3` left, `OP4` logical.
    Shift,
    /// Rotate `OP1` by `OP2`; `OP3` left.
    Rotate,
}

/// Staged operand registers OP1-OP4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// OP1.
    pub op1: u32,
    /// OP2.
    pub op2: u32,
    /// OP3.
    pub op3: u32,
    /// OP4.
    pub op4: u32,
}

/// Result of one ALU invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutcome {
    /// Value for RESULT; `None` when the destination must be left unchanged.
    pub result: Option<u32>,
    /// Second half of a pair result (low word / remainder).
    pub extra: Option<u32>,
    /// Condition code change, at most one.
    pub cc: Option<CcUpdate>,
}

impl AluOutcome {
    /// A single result with no flag change.
    pub const fn value(result: u32) -> Self {
        Self {
            result: Some(result),
            extra: None,
            cc: None,
        }
    }

    /// A single result with a flag change.
    pub const fn flagged(result: u32, cc: Option<CcUpdate>) -> Self {
        Self {
            result: Some(result),
            extra: None,
            cc,
        }
    }
}

/// Arithmetic Logic Unit.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation on the staged operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use vnsim_core::core::units::alu::{Alu, AluOp, CcUpdate, ConditionCode, Operands};
    ///
    /// let out = Alu::execute(AluOp::Add, Operands { op1: 5, op2: 7, ..Default::default() });
    /// assert_eq!(out.result, Some(12));
    /// assert_eq!(out.cc, None);
    ///
    /// let out = Alu::execute(AluOp::Sub, Operands { op1: 1, op2: 2, ..Default::default() });
    /// assert_eq!(out.cc, Some(CcUpdate::Set(ConditionCode::Underflow)));
    /// ```
    pub fn execute(op: AluOp, ops: Operands) -> AluOutcome {
        match op {
            AluOp::Add => arithmetic::add(ops.op1, ops.op2),
            AluOp::Sub => arithmetic::sub(ops.op1, ops.op2),
            AluOp::Mul => arithmetic::mul(ops.op1, ops.op2),
            AluOp::Div => arithmetic::div(ops.op1, ops.op2),
            AluOp::Compare => logic::compare(ops.op1, ops.op2),
            AluOp::And => logic::and(ops.op1, ops.op2),
            AluOp::Or => logic::or(ops.op1, ops.op2),
            AluOp::Not => logic::not(ops.op1),
            AluOp::Shift => shifts::shift(ops.op1, ops.op2, ops.op3 == 1, ops.op4 == 1),
            AluOp::Rotate => shifts::rotate(ops.op1, ops.op2, ops.op3 == 1),
        }
    }
}
