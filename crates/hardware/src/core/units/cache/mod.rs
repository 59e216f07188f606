//! Fully-Associative Write-Through L1 Cache.
//!
//! This module implements the small set-less cache in front of the word store.
//! Lines hold a contiguous block of words starting at an aligned tag, so no two
//! lines ever cover the same address. Lookups are a linear scan. Writes mark
//! the touched word dirty until the write buffer propagates it; dirty lines are
//! never chosen for eviction.

/// Cache eviction policy implementations (Random, FIFO).
pub mod policies;

use tracing::debug;

use self::policies::{EvictionPolicy, FifoPolicy, RandomPolicy};
use crate::common::error::{Result, SimError};
use crate::common::Word;
use crate::config::{CacheConfig, EvictionPolicy as PolicyType};

/// One cache line: a tag, its words, and a per-word dirty mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    tag: usize,
    words: Vec<Word>,
    dirty: u64,
}

impl CacheLine {
    /// Creates a clean line holding `words` starting at `tag`.
    pub fn new(tag: usize, words: Vec<Word>) -> Self {
        Self {
            tag,
            words,
            dirty: 0,
        }
    }

    /// First address covered by the line.
    #[inline]
    pub const fn tag(&self) -> usize {
        self.tag
    }

    /// Words held by the line.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// True when `addr` falls inside the line.
    #[inline]
    pub fn contains(&self, addr: usize) -> bool {
        self.tag <= addr && addr < self.tag + self.words.len()
    }

    /// True when at least one word has not reached main memory yet.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// True when the word at `addr` is dirty.
    pub fn is_word_dirty(&self, addr: usize) -> bool {
        self.contains(addr) && self.dirty & (1 << (addr - self.tag)) != 0
    }

    const fn offset(&self, addr: usize) -> usize {
        addr - self.tag
    }
}

/// The L1 cache.
pub struct Cache {
    lines: Vec<CacheLine>,
    capacity: usize,
    line_words: usize,
    max_eviction_attempts: usize,
    policy: Box<dyn EvictionPolicy>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("lines", &self.lines)
            .field("capacity", &self.capacity)
            .field("line_words", &self.line_words)
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates an empty cache with the configured geometry and policy.
    ///
    /// Zero sizes fall back to one slot and one word per line.
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = config.lines.max(1);
        let line_words = config.words_per_line.clamp(1, 64);
        let policy: Box<dyn EvictionPolicy> = match config.policy {
            PolicyType::Random => Box::new(RandomPolicy::new(capacity, config.seed)),
            PolicyType::Fifo => Box::new(FifoPolicy::new(capacity)),
        };
        Self::with_policy(capacity, line_words, config.max_eviction_attempts, policy)
    }

    /// Creates an empty cache with an explicit policy object.
    pub fn with_policy(
        capacity: usize,
        line_words: usize,
        max_eviction_attempts: usize,
        policy: Box<dyn EvictionPolicy>,
    ) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            capacity,
            line_words,
            max_eviction_attempts: max_eviction_attempts.max(1),
            policy,
        }
    }

    /// Number of slots.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Words per line.
    pub const fn line_words(&self) -> usize {
        self.line_words
    }

    /// Tag of the line that would hold `addr`.
    #[inline]
    pub const fn line_base(&self, addr: usize) -> usize {
        addr - addr % self.line_words
    }

    /// Lines currently held, in slot order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    fn find(&self, addr: usize) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(addr))
    }

    /// Looks up `addr`; `None` on a miss.
    pub fn read(&self, addr: usize) -> Option<Word> {
        self.find(addr).map(|slot| {
            let line = &self.lines[slot];
            line.words[line.offset(addr)]
        })
    }

    /// Writes `word` at `addr` if the line is present, marking the word dirty.
    ///
    /// Returns `false` on a miss; the caller fetches the line and retries.
    pub fn write(&mut self, addr: usize, word: Word) -> bool {
        let Some(slot) = self.find(addr) else {
            return false;
        };
        let line = &mut self.lines[slot];
        let offset = line.offset(addr);
        line.words[offset] = word;
        line.dirty |= 1 << offset;
        true
    }

    /// Updates a present line without marking it dirty. Used when main
    /// memory is written behind the cache's back (program loading).
    pub fn refresh(&mut self, addr: usize, word: Word) {
        if let Some(slot) = self.find(addr) {
            let line = &mut self.lines[slot];
            let offset = line.offset(addr);
            line.words[offset] = word;
        }
    }

    /// Clears the dirty bit of the word at `addr`, if a line still holds it.
    pub fn clear_dirty(&mut self, addr: usize) {
        if let Some(slot) = self.find(addr) {
            let line = &mut self.lines[slot];
            line.dirty &= !(1 << line.offset(addr));
        }
    }

    /// Installs a line fetched from main memory.
    ///
    /// Appends while a slot is free. Once full, victims proposed by the policy
    /// are accepted only if clean; selection is retried up to the configured
    /// bound, after which the eviction is reported as livelocked.
    ///
    /// # Returns
    ///
    /// The evicted line, if one was replaced.
    ///
    /// # Errors
    ///
    /// [`SimError::EvictionLivelock`] when no clean victim was found.
    pub fn insert(&mut self, line: CacheLine) -> Result<Option<CacheLine>> {
        debug_assert!(self.find(line.tag).is_none(), "line aliasing");

        if self.lines.len() < self.capacity {
            let slot = self.lines.len();
            self.lines.push(line);
            self.policy.update(slot);
            return Ok(None);
        }

        for _ in 0..self.max_eviction_attempts {
            let slot = self.policy.get_victim() % self.capacity;
            if self.lines[slot].is_dirty() {
                continue;
            }
            let evicted = std::mem::replace(&mut self.lines[slot], line);
            self.policy.update(slot);
            debug!(slot, tag = evicted.tag, "evicted cache line");
            return Ok(Some(evicted));
        }

        Err(SimError::EvictionLivelock {
            attempts: self.max_eviction_attempts,
        })
    }

    /// Drops every line. Dirty words are lost from the cache but not from
    /// main memory, since their buffer entries still drain.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
