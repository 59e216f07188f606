//! ALU logical and comparison operations.

use super::{AluOutcome, CcUpdate, ConditionCode};
use crate::common::constants::WORD_MASK;

/// Bitwise AND.
pub const fn and(a: u32, b: u32) -> AluOutcome {
    AluOutcome::value(a & b & WORD_MASK)
}

/// Bitwise OR.
pub const fn or(a: u32, b: u32) -> AluOutcome {
    AluOutcome::value((a | b) & WORD_MASK)
}

/// Bitwise NOT within the word.
pub const fn not(a: u32) -> AluOutcome {
    AluOutcome::value(!a & WORD_MASK)
}

/// Equality test on a zero difference. Sets the equal bit when the operands
/// match and clears it otherwise; no result is produced.
pub const fn compare(a: u32, b: u32) -> AluOutcome {
    let equal = (a & WORD_MASK).wrapping_sub(b & WORD_MASK) == 0;
    AluOutcome {
        result: None,
        extra: None,
        cc: Some(if equal {
            CcUpdate::Set(ConditionCode::EqualOrNot)
        } else {
            CcUpdate::Clear(ConditionCode::EqualOrNot)
        }),
    }
}
