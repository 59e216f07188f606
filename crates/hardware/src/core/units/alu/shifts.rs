//! ALU shift and rotate operations.
//!
//! Left shifts are the same for both modes. Right shifts either fill with
//! zeroes (logical) or replicate bit 0, the sign bit (arithmetic). Rotation
//! wraps within the 18-bit word. A count of zero leaves the value unchanged.

use super::AluOutcome;
use crate::common::constants::{WORD_BITS, WORD_MASK, WORD_SIGN_BIT};

/// Shifts `value` by `count` bits.
///
/// # Arguments
///
/// * `value` - Word to shift.
/// * `count` - Bit count; counts of 18 or more shift everything out.
/// * `left` - Direction (`LR` = 1).
/// * `logical` - Fill mode for right shifts (`AL` = 1).
pub fn shift(value: u32, count: u32, left: bool, logical: bool) -> AluOutcome {
    let value = value & WORD_MASK;
    if count == 0 {
        return AluOutcome::value(value);
    }
    let result = if left {
        if count >= WORD_BITS {
            0
        } else {
            (value << count) & WORD_MASK
        }
    } else if logical || value & WORD_SIGN_BIT == 0 {
        if count >= WORD_BITS { 0 } else { value >> count }
    } else {
        let count = count.min(WORD_BITS);
        let fill = WORD_MASK & !(WORD_MASK >> count);
        (value >> count.min(WORD_BITS - 1)) | fill
    };
    AluOutcome::value(result)
}

/// Rotates `value` by `count` bits within the word.
pub const fn rotate(value: u32, count: u32, left: bool) -> AluOutcome {
    let value = value & WORD_MASK;
    let count = count % WORD_BITS;
    if count == 0 {
        return AluOutcome::value(value);
    }
    let result = if left {
        ((value << count) | (value >> (WORD_BITS - count))) & WORD_MASK
    } else {
        ((value >> count) | (value << (WORD_BITS - count))) & WORD_MASK
    };
    AluOutcome::value(result)
}
