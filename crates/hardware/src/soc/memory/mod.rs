//! Memory Subsystem.
//!
//! This module implements everything behind the engine's memory port. It provides:
//! 1. **Store:** The bounds-checked main memory array (`WordStore`).
//! 2. **Write Buffer:** The bounded FIFO of stores awaiting propagation.
//! 3. **Controller:** The background thread draining the write buffer.
//! 4. **Memory:** A cloneable handle that serialises the engine and the controller
//!    over the store, the cache and the buffer.
//!
//! Reads go through the cache and fill a whole line on a miss. Writes update
//! the cached copy (filling first on a miss), mark the word dirty and enqueue a
//! write buffer entry; main memory is updated later by the controller. A store
//! waits for buffer space *before* touching the cache, so a blocked writer
//! never leaves a dirty word without a matching entry.

/// Main memory array.
pub mod store;

/// Bounded FIFO of pending stores.
pub mod write_buffer;

/// Background thread that drains the write buffer.
pub mod controller;

pub use self::controller::MemoryController;
pub use self::store::WordStore;
pub use self::write_buffer::{WriteBuffer, WriteBufferEntry};

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::common::error::{Result, SimError};
use crate::common::{AccessType, Word};
use crate::config::Config;
use crate::core::units::cache::{Cache, CacheLine};
use crate::stats::MemoryStats;

/// Life cycle of the draining side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ControllerState {
    /// No controller has been started; a store into a full buffer drains
    /// the oldest entry itself.
    Idle,
    /// A controller thread is draining.
    Running,
    /// The controller has exited; further stores are rejected.
    Stopped,
}

#[derive(Debug)]
struct MemoryState {
    store: WordStore,
    cache: Cache,
    buffer: WriteBuffer,
    stats: MemoryStats,
    controller: ControllerState,
    stop_requested: bool,
}

impl MemoryState {
    /// Fetches the line holding `addr` from the store and installs it.
    fn fill_line(&mut self, addr: usize, kind: AccessType) -> Result<()> {
        let base = self.cache.line_base(addr);
        let words = self.store.read_line(base, self.cache.line_words());
        debug!(addr, base, kind = kind.label(), "cache miss, filling line");
        if self.cache.insert(CacheLine::new(base, words))?.is_some() {
            self.stats.evictions += 1;
        }
        Ok(())
    }

    /// Propagates the oldest buffered store to main memory.
    ///
    /// The cached word stays dirty while a younger store to the same address
    /// is still queued.
    fn drain_one(&mut self) -> Option<WriteBufferEntry> {
        let entry = self.buffer.pop()?;
        if let Err(err) = self.store.write(entry.address, entry.word) {
            // Addresses are validated at enqueue time.
            debug!(%err, "dropping write buffer entry");
            return Some(entry);
        }
        if !self.buffer.contains_address(entry.address) {
            self.cache.clear_dirty(entry.address);
        }
        self.stats.drains += 1;
        debug!(
            address = entry.address,
            word = %entry.word,
            pending = self.buffer.len(),
            "drained write buffer entry"
        );
        Some(entry)
    }

    fn drain_all(&mut self) {
        while self.drain_one().is_some() {}
    }
}

#[derive(Debug)]
struct Shared {
    state: Mutex<MemoryState>,
    /// Signalled when an entry is enqueued or a stop is requested.
    not_empty: Condvar,
    /// Signalled after every drain.
    not_full: Condvar,
}

/// Handle to the memory subsystem, shared by the engine and the controller.
#[derive(Clone, Debug)]
pub struct Memory {
    shared: Arc<Shared>,
}

impl Memory {
    /// Builds a zeroed store, an empty cache and an empty write buffer.
    pub fn new(config: &Config) -> Self {
        let state = MemoryState {
            store: WordStore::new(config.memory.words),
            cache: Cache::new(&config.cache),
            buffer: WriteBuffer::new(config.memory.write_buffer_capacity),
            stats: MemoryStats::default(),
            controller: ControllerState::Idle,
            stop_requested: false,
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                not_empty: Condvar::new(),
                not_full: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of words of main memory.
    pub fn size(&self) -> usize {
        self.lock().store.len()
    }

    /// Reads `addr` through the cache, filling the line on a miss.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] for an address outside main memory,
    /// [`SimError::EvictionLivelock`] when no clean line can be replaced.
    pub fn read(&self, addr: usize, kind: AccessType) -> Result<Word> {
        let mut state = self.lock();
        state.store.check(addr)?;

        if let Some(word) = state.cache.read(addr) {
            state.stats.record(kind, true);
            trace!(addr, kind = kind.label(), "cache hit");
            return Ok(word);
        }
        state.stats.record(kind, false);
        state.fill_line(addr, kind)?;
        state
            .cache
            .read(addr)
            .map_or_else(|| state.store.read(addr), Ok)
    }

    /// Stores `word` at `addr`: updates the cache and queues the store for
    /// main memory. While the write buffer is full the caller blocks until the
    /// controller drains an entry; with no controller started, the oldest
    /// entry is drained on the caller's thread instead.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] for a bad address,
    /// [`SimError::ControllerStopped`] once the controller has exited,
    /// [`SimError::EvictionLivelock`] when a miss cannot be filled.
    pub fn write(&self, addr: usize, word: Word) -> Result<()> {
        let mut state = self.lock();
        state.store.check(addr)?;

        let mut stalled = false;
        loop {
            if state.controller == ControllerState::Stopped {
                return Err(SimError::ControllerStopped);
            }
            if !state.buffer.is_full() {
                break;
            }
            if !stalled {
                stalled = true;
                state.stats.buffer_stalls += 1;
                debug!(addr, "write buffer full");
            }
            if state.controller == ControllerState::Idle {
                // Nothing else will drain; make room on this thread.
                let _ = state.drain_one();
                continue;
            }
            state = self
                .shared
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        let hit = state.cache.write(addr, word);
        state.stats.record(AccessType::Write, hit);
        if hit {
            trace!(addr, kind = AccessType::Write.label(), "cache hit");
        } else {
            state.fill_line(addr, AccessType::Write)?;
            if !state.cache.write(addr, word) {
                // Line vanished between fill and write; cannot happen under the lock.
                return Err(SimError::AddressOutOfRange {
                    address: addr,
                    limit: state.store.len(),
                });
            }
        }

        if state
            .buffer
            .push(WriteBufferEntry { address: addr, word })
            .is_err()
        {
            return Err(SimError::ControllerStopped);
        }
        drop(state);
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Writes main memory directly, bypassing the write buffer. A cached copy
    /// is refreshed in place. Used for program loading.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] for a bad address.
    pub fn load(&self, addr: usize, word: Word) -> Result<()> {
        let mut state = self.lock();
        state.store.write(addr, word)?;
        state.cache.refresh(addr, word);
        Ok(())
    }

    /// Reads main memory directly, ignoring the cache.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`] for a bad address.
    pub fn peek_store(&self, addr: usize) -> Result<Word> {
        self.lock().store.read(addr)
    }

    /// Blocks until every queued store has reached main memory. Without a
    /// running controller the buffer is drained on the caller's thread.
    pub fn flush(&self) {
        let mut state = self.lock();
        if state.controller != ControllerState::Running {
            state.drain_all();
            return;
        }
        while !state.buffer.is_empty() {
            state = self
                .shared
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of stores still queued.
    pub fn pending_writes(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Queued stores, oldest first.
    pub fn pending_entries(&self) -> Vec<WriteBufferEntry> {
        self.lock().buffer.iter().copied().collect()
    }

    /// Copy of the resident cache lines.
    pub fn cache_snapshot(&self) -> Vec<CacheLine> {
        self.lock().cache.lines().to_vec()
    }

    /// Current counters.
    pub fn stats(&self) -> MemoryStats {
        self.lock().stats
    }

    /// Zeroes main memory and empties the cache and the buffer.
    pub fn clear(&self) {
        let mut state = self.lock();
        let size = state.store.len();
        state.store = WordStore::new(size);
        state.cache.clear();
        while state.buffer.pop().is_some() {}
        state.stats = MemoryStats::default();
        drop(state);
        self.shared.not_full.notify_all();
    }
}
