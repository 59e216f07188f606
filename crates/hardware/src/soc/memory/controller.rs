//! Memory controller thread.
//!
//! The controller runs beside the execution engine and moves stores from the
//! write buffer to main memory, one entry per wake-up. It sleeps while the
//! buffer is empty and signals the engine after every drain so a writer
//! blocked on a full buffer can proceed.
//!
//! On shutdown the controller drains whatever is still queued before exiting,
//! so no acknowledged store is lost.

use std::sync::{Arc, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::{ControllerState, Memory, Shared};
use crate::common::error::Result;

/// Owner of the background drain thread. Dropping it stops and joins the thread.
#[derive(Debug)]
pub struct MemoryController {
    memory: Memory,
    handle: Option<JoinHandle<()>>,
}

impl MemoryController {
    /// Starts draining `memory`'s write buffer on a new thread.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`](crate::common::SimError::Io) if the thread cannot be spawned.
    pub fn spawn(memory: &Memory) -> Result<Self> {
        {
            let mut state = memory.lock();
            state.controller = ControllerState::Running;
            state.stop_requested = false;
        }

        let shared = Arc::clone(&memory.shared);
        let handle = thread::Builder::new()
            .name("memory-controller".into())
            .spawn(move || run(&shared))?;
        debug!("memory controller started");

        Ok(Self {
            memory: memory.clone(),
            handle: Some(handle),
        })
    }

    /// True until [`shutdown`](Self::shutdown) has joined the thread.
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Requests a stop, waits for the remaining entries to drain and joins
    /// the thread. Idempotent.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.memory.lock().stop_requested = true;
        self.memory.shared.not_empty.notify_all();
        if handle.join().is_err() {
            warn!("memory controller thread panicked");
            let mut state = self.memory.lock();
            state.drain_all();
            state.controller = ControllerState::Stopped;
        }
        debug!("memory controller stopped");
    }
}

impl Drop for MemoryController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(shared: &Shared) {
    loop {
        let mut state = shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.buffer.is_empty() && !state.stop_requested {
            state = shared
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.stop_requested {
            state.drain_all();
            state.controller = ControllerState::Stopped;
            drop(state);
            shared.not_full.notify_all();
            return;
        }

        let _ = state.drain_one();
        drop(state);
        shared.not_full.notify_all();
    }
}
