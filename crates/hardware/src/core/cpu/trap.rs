//! Machine Faults and Software Traps.
//!
//! This module implements the two ways control leaves the running program:
//! 1. **Faults:** PC and MSR are saved at the reserved locations 4 and 5, the
//!    fault's MFR bit is set and PC is loaded from the handler address at
//!    location 1. Faults are recoverable; execution continues in the handler.
//! 2. **TRAP:** PC+1 is saved at location 2 and PC is loaded from the trap
//!    table whose base is stored at location 0. Codes outside the table fault.

use tracing::{debug, warn};

use super::Cpu;
use crate::common::constants::{
    FAULT_HANDLER_ADDR, FAULT_MSR_ADDR, FAULT_PC_ADDR, TRAP_RETURN_ADDR, TRAP_TABLE_ADDR,
    TRAP_TABLE_ENTRIES,
};
use crate::common::error::Result;
use crate::common::{AccessType, MachineFault, RegName, Word};

impl Cpu {
    /// Runs the fault sequence for `fault`.
    ///
    /// # Errors
    ///
    /// Fails only if the reserved locations are outside main memory.
    pub(crate) fn raise_fault(&mut self, fault: MachineFault) -> Result<()> {
        let pc = self.reg(RegName::Pc);
        warn!(pc, %fault, ir = %Word::new(self.reg(RegName::Ir)), "machine fault");

        self.memory.write(FAULT_PC_ADDR, Word::new(pc))?;
        self.memory
            .write(FAULT_MSR_ADDR, Word::new(self.reg(RegName::Msr)))?;

        let mut mfr = self.regs.register(RegName::Mfr);
        mfr.set_bit(fault.mfr_bit(), true);
        self.set_reg(RegName::Mfr, mfr.get());

        let handler = self
            .memory
            .read(FAULT_HANDLER_ADDR, AccessType::Read)?
            .value();
        self.set_reg(RegName::Pc, handler);
        self.jump_taken = true;
        self.stats.faults_taken += 1;
        Ok(())
    }

    /// Executes TRAP with the decoded TRAPCODE.
    ///
    /// # Errors
    ///
    /// Fails when the trap table or its entry lies outside main memory.
    pub(crate) fn take_trap(&mut self) -> Result<()> {
        let code = self.reg(RegName::TrapCode);
        if code >= TRAP_TABLE_ENTRIES {
            return self.raise_fault(MachineFault::IllegalTrapCode);
        }

        let pc = self.reg(RegName::Pc);
        self.memory.write(TRAP_RETURN_ADDR, Word::new(pc + 1))?;

        let table = self.memory.read(TRAP_TABLE_ADDR, AccessType::Read)?.value();
        let entry = (table + code) as usize;
        let routine = self.memory.read(entry, AccessType::Read)?.value();
        debug!(code, table, routine, "trap");

        self.set_reg(RegName::Pc, routine);
        self.jump_taken = true;
        self.stats.traps_taken += 1;
        Ok(())
    }
}
