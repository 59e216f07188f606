//! Main Memory Word Store.
//!
//! A flat, bounds-checked array of 18-bit words. Any access outside the array
//! is a fatal error surfaced to the caller; nothing is wrapped or clamped.

use crate::common::error::{Result, SimError};
use crate::common::Word;

/// The simulated main memory.
#[derive(Clone, Debug)]
pub struct WordStore {
    words: Vec<Word>,
}

impl WordStore {
    /// Creates a zeroed store of `size` words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![Word::ZERO; size],
        }
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a zero-sized store.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Checks that `addr` is inside the store.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] otherwise.
    #[inline]
    pub fn check(&self, addr: usize) -> Result<()> {
        if addr < self.words.len() {
            Ok(())
        } else {
            Err(SimError::AddressOutOfRange {
                address: addr,
                limit: self.words.len(),
            })
        }
    }

    /// Reads one word.
    ///
    /// # Errors
    ///
    /// As [`check`](Self::check).
    pub fn read(&self, addr: usize) -> Result<Word> {
        self.check(addr)?;
        Ok(self.words[addr])
    }

    /// Writes one word.
    ///
    /// # Errors
    ///
    /// As [`check`](Self::check).
    pub fn write(&mut self, addr: usize, word: Word) -> Result<()> {
        self.check(addr)?;
        self.words[addr] = word;
        Ok(())
    }

    /// Copies `len` words starting at `base` for a cache line fill. Words
    /// past the end of the store read as zero; the caller has already checked
    /// the address that caused the fill.
    pub fn read_line(&self, base: usize, len: usize) -> Vec<Word> {
        (base..base + len)
            .map(|addr| self.words.get(addr).copied().unwrap_or(Word::ZERO))
            .collect()
    }
}
