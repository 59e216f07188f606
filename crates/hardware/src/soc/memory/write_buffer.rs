//! Write Buffer.
//!
//! Bounded FIFO of stores waiting to be propagated from the cache to main
//! memory. The queue itself never blocks; blocking on a full queue is done by
//! [`Memory::write`](super::Memory::write) around it.

use std::collections::VecDeque;

use crate::common::Word;

/// A store queued for main memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteBufferEntry {
    /// Target address.
    pub address: usize,
    /// Value written.
    pub word: Word,
}

/// Bounded FIFO of pending stores.
#[derive(Debug)]
pub struct WriteBuffer {
    entries: VecDeque<WriteBufferEntry>,
    capacity: usize,
}

impl WriteBuffer {
    /// Creates an empty buffer holding at most `capacity` entries (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no more entries fit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Hands `entry` back when the buffer is full.
    pub fn push(&mut self, entry: WriteBufferEntry) -> Result<(), WriteBufferEntry> {
        if self.is_full() {
            return Err(entry);
        }
        self.entries.push_back(entry);
        Ok(())
    }

    /// Removes the oldest entry.
    pub fn pop(&mut self) -> Option<WriteBufferEntry> {
        self.entries.pop_front()
    }

    /// True when an entry for `addr` is still queued.
    pub fn contains_address(&self, addr: usize) -> bool {
        self.entries.iter().any(|e| e.address == addr)
    }

    /// Queued entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WriteBufferEntry> {
        self.entries.iter()
    }
}
