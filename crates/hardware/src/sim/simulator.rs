//! Simulator: owns the CPU and the memory controller thread side by side.
//!
//! The engine and the controller share one [`Memory`] handle. The controller
//! is started on construction and stopped (after draining) when the simulator
//! is shut down or dropped, so several simulators can coexist in one process.

use std::path::Path;

use crate::common::error::Result;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::RunOutcome;
use crate::sim::loader;
use crate::soc::memory::{Memory, MemoryController};
use crate::soc::traits::FrontPanel;
use crate::stats::MemoryStats;

/// Top-level simulator: execution engine plus memory controller.
#[derive(Debug)]
pub struct Simulator {
    /// Execution engine.
    pub cpu: Cpu,
    controller: MemoryController,
}

impl Simulator {
    /// Builds memory, starts the controller thread and creates the CPU.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`](crate::common::SimError::Io) if the controller thread cannot be spawned.
    pub fn new(config: &Config) -> Result<Self> {
        let memory = Memory::new(config);
        let controller = MemoryController::spawn(&memory)?;
        let cpu = Cpu::new(memory, config);
        Ok(Self { cpu, controller })
    }

    /// As [`new`](Self::new), with a front panel attached.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_panel(config: &Config, panel: Box<dyn FrontPanel>) -> Result<Self> {
        let mut sim = Self::new(config)?;
        sim.cpu.set_panel(panel);
        Ok(sim)
    }

    /// Loads a program image file and performs the initial program load.
    ///
    /// # Errors
    ///
    /// I/O, parse and address errors from the loader.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let image = loader::read_image(path)?;
        loader::load_image(&mut self.cpu, &image)?;
        self.cpu.ipl();
        Ok(image.len())
    }

    /// Runs to HLT, an input wait or the instruction limit.
    ///
    /// # Errors
    ///
    /// Fatal engine errors.
    pub fn run(&mut self, max_instructions: Option<u64>) -> Result<RunOutcome> {
        self.cpu.run_until(max_instructions)
    }

    /// The shared memory handle.
    pub const fn memory(&self) -> &Memory {
        self.cpu.memory()
    }

    /// Memory subsystem counters.
    pub fn memory_stats(&self) -> MemoryStats {
        self.cpu.memory().stats()
    }

    /// True while the controller thread is alive.
    pub fn controller_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Drains the write buffer and stops the controller thread. Stores issued
    /// afterwards fail with
    /// [`SimError::ControllerStopped`](crate::common::SimError::ControllerStopped).
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}
