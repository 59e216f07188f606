//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Owns the register file and the micro-step position.
//! 2. **Memory Port:** Holds a [`Memory`] handle shared with the controller thread.
//! 3. **Collaborators:** Notifies a [`FrontPanel`] of register writes, output and halts,
//!    and routes I/O instructions to the attached devices.

/// Effective address computation.
pub mod address;

/// Micro-step interpreter and the driving modes built on it.
pub mod execution;

/// IN, OUT and CHK.
pub mod io;

/// Static micro-programs for the execute phase.
pub mod microcode;

/// Machine faults and the TRAP instruction.
pub mod trap;

pub use self::execution::{RunOutcome, StepOutcome};

use crate::common::error::Result;
use crate::common::{RegName, RegisterFile, Word};
use crate::config::Config;
use crate::soc::devices::Devices;
use crate::soc::memory::Memory;
use crate::soc::traits::{FrontPanel, NullPanel};
use crate::stats::SimStats;

/// Processor state and the collaborators it drives.
// Each flag is a separate front panel indicator.
#[allow(clippy::struct_excessive_bools)]
pub struct Cpu {
    regs: RegisterFile,
    memory: Memory,
    panel: Box<dyn FrontPanel>,
    devices: Devices,

    /// Position within the current instruction; 0-3 fetch and decode.
    prog_step: u8,
    /// Set when the current instruction redirected PC; consumed at completion.
    jump_taken: bool,
    /// The continue flag: cleared by HLT.
    running: bool,
    /// Latched by HLT until reset or IPL.
    halted: bool,
    /// IN found the keyboard empty; the same micro-operation re-runs after input.
    waiting: bool,
    /// RESULT holds a value the pending writeback must store.
    pending_writeback: bool,
    /// Second word of a MLT/DVD result.
    pair_low: Option<u32>,
    /// The current instruction was injected by `execute_word`; PC does not advance.
    single_word: bool,

    boot_address: u32,
    trace: bool,
    stats: SimStats,
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("pc", &self.regs.read(RegName::Pc))
            .field("prog_step", &self.prog_step)
            .field("running", &self.running)
            .field("halted", &self.halted)
            .field("waiting", &self.waiting)
            .finish_non_exhaustive()
    }
}

impl Cpu {
    /// Creates a CPU over `memory` with every register zeroed and no panel attached.
    ///
    /// # Arguments
    ///
    /// * `memory` - Handle to the memory subsystem. The caller owns the controller thread.
    /// * `config` - Simulator configuration (boot address, tracing).
    pub fn new(memory: Memory, config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory,
            panel: Box::new(NullPanel),
            devices: Devices::default(),
            prog_step: 0,
            jump_taken: false,
            running: false,
            halted: false,
            waiting: false,
            pending_writeback: false,
            pair_low: None,
            single_word: false,
            boot_address: config.general.boot_address,
            trace: config.general.trace_micro_steps,
            stats: SimStats::default(),
        }
    }

    /// Attaches a front panel, replacing the previous one.
    pub fn set_panel(&mut self, panel: Box<dyn FrontPanel>) {
        self.panel = panel;
    }

    /// Reads a register.
    #[inline]
    pub const fn reg(&self, name: RegName) -> u32 {
        self.regs.read(name)
    }

    /// Writes a register (truncating to its width) and notifies the panel.
    pub fn set_reg(&mut self, name: RegName, value: u32) {
        let stored = self.regs.write(name, value);
        self.panel.register_changed(name, stored);
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// The memory handle.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Places an encoded word in main memory.
    ///
    /// # Errors
    ///
    /// [`SimError::AddressOutOfRange`](crate::common::SimError::AddressOutOfRange)
    /// for an address outside main memory.
    pub fn load_word(&mut self, addr: usize, word: Word) -> Result<()> {
        self.memory.load(addr, word)
    }

    /// Initial program load: clears the engine state and points PC at the
    /// boot address. Memory contents are kept.
    pub fn ipl(&mut self) {
        self.clear_state();
        self.set_reg(RegName::Pc, self.boot_address);
        self.running = true;
    }

    /// Clears registers, devices and main memory.
    pub fn reset(&mut self) {
        self.clear_state();
        self.devices.keyboard.clear();
        let _ = self.devices.printer.take_output();
        self.memory.clear();
    }

    fn clear_state(&mut self) {
        self.regs.reset();
        for name in RegName::ALL {
            self.panel.register_changed(name, 0);
        }
        self.prog_step = 0;
        self.jump_taken = false;
        self.running = false;
        self.halted = false;
        self.waiting = false;
        self.pending_writeback = false;
        self.pair_low = None;
        self.single_word = false;
    }

    /// Queues keyboard input and wakes an IN waiting on it.
    pub fn provide_input(&mut self, text: &str) {
        self.devices.keyboard.push_str(text);
        if self.waiting && !text.is_empty() {
            self.waiting = false;
        }
    }

    /// Micro-step within the current instruction.
    pub const fn prog_step(&self) -> u8 {
        self.prog_step
    }

    /// The continue flag.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// True after HLT until reset or IPL.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// True while an IN is waiting for keyboard input.
    pub const fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Everything the printer has emitted.
    pub fn output(&self) -> &str {
        self.devices.printer.output()
    }

    /// Engine statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Architectural registers formatted for display.
    pub fn dump_state(&self) -> String {
        self.regs.dump()
    }
}
