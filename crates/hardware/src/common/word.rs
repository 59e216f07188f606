//! Machine Word type.
//!
//! This module defines the 18-bit word that every memory cell and most registers hold.
//! It provides the following:
//! 1. **Width Enforcement:** Construction truncates to 18 bits, keeping the low-order bits.
//! 2. **Field Extraction:** MSB-first bit ranges, matching the instruction layout tables.
//! 3. **Signed View:** Two's-complement interpretation for the signed branch conditions.

use std::fmt;

use super::constants::{WORD_BITS, WORD_MASK, WORD_SIGN_BIT};

/// One 18-bit machine word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(u32);

impl Word {
    /// The all-zero word.
    pub const ZERO: Self = Self(0);

    /// Creates a word, keeping the low 18 bits of `value`.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value & WORD_MASK)
    }

    /// Returns the raw (unsigned) value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Extracts the inclusive bit range `start..=end`, where bit 0 is the most
    /// significant bit of the word.
    ///
    /// # Arguments
    ///
    /// * `start` - First bit of the field (MSB side).
    /// * `end` - Last bit of the field (LSB side), `start <= end < 18`.
    ///
    /// # Returns
    ///
    /// The field value right-aligned.
    #[inline]
    pub const fn field(self, start: u32, end: u32) -> u32 {
        let width = end - start + 1;
        let shift = WORD_BITS - 1 - end;
        (self.0 >> shift) & ((1 << width) - 1)
    }

    /// True when the sign bit (bit 0) is set.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 & WORD_SIGN_BIT != 0
    }

    /// Two's-complement value of the word.
    #[inline]
    pub const fn signed(self) -> i32 {
        if self.is_negative() {
            self.0 as i32 - (1 << WORD_BITS)
        } else {
            self.0 as i32
        }
    }
}

impl From<Word> for u32 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl From<u32> for Word {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Word {
    /// Formats the word as six octal digits, the front panel convention.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}
