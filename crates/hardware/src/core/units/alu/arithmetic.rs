//! ALU arithmetic operations.
//!
//! Addition and subtraction share the immediate-zero short-circuit: a zero
//! second operand copies the first through untouched and leaves CC alone.
//! Overflow is an unsigned carry out of the 18-bit word, underflow an
//! unsigned borrow.

use super::{AluOutcome, CcUpdate, ConditionCode};
use crate::common::constants::{WORD_BITS, WORD_MASK};

/// `a + b` with overflow detection.
pub fn add(a: u32, b: u32) -> AluOutcome {
    let a = a & WORD_MASK;
    let b = b & WORD_MASK;
    if b == 0 {
        return AluOutcome::value(a);
    }
    let sum = a + b;
    let cc = (sum > WORD_MASK).then_some(CcUpdate::Set(ConditionCode::Overflow));
    AluOutcome::flagged(sum & WORD_MASK, cc)
}

/// `a - b` with underflow detection.
pub fn sub(a: u32, b: u32) -> AluOutcome {
    let a = a & WORD_MASK;
    let b = b & WORD_MASK;
    if b == 0 {
        return AluOutcome::value(a);
    }
    let cc = (a < b).then_some(CcUpdate::Set(ConditionCode::Underflow));
    AluOutcome::flagged(a.wrapping_sub(b) & WORD_MASK, cc)
}

/// Unsigned 18x18 multiply; `result` is the high word, `extra` the low word.
pub fn mul(a: u32, b: u32) -> AluOutcome {
    let product = u64::from(a & WORD_MASK) * u64::from(b & WORD_MASK);
    AluOutcome {
        result: Some((product >> WORD_BITS) as u32 & WORD_MASK),
        extra: Some(product as u32 & WORD_MASK),
        cc: None,
    }
}

/// Unsigned divide; `result` is the quotient, `extra` the remainder.
///
/// Division by zero sets the divide-by-zero bit and produces no result.
pub const fn div(a: u32, b: u32) -> AluOutcome {
    let a = a & WORD_MASK;
    let b = b & WORD_MASK;
    if b == 0 {
        return AluOutcome {
            result: None,
            extra: None,
            cc: Some(CcUpdate::Set(ConditionCode::DivideByZero)),
        };
    }
    AluOutcome {
        result: Some(a / b),
        extra: Some(a % b),
        cc: None,
    }
}
