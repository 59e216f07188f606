//! Main Execution Loop.
//!
//! This module implements the micro-step state machine and the driving modes
//! built on it. It performs the following:
//! 1. **Fetch/Decode:** Steps 0-3 move PC to MAR, read the instruction through the
//!    cache, latch it in IR and scatter its fields into the field registers.
//! 2. **Execute:** Steps 4 and up interpret the opcode's micro-program one entry at a time.
//! 3. **Completion:** PC advances by one unless the instruction redirected it.
//! 4. **Driving:** Continue, macro step, micro step and single-word execution.

use tracing::{debug, trace, warn};

use super::Cpu;
use super::microcode::{self, BranchCondition, MicroOp, Target};
use crate::common::constants::EXECUTE_STEP;
use crate::common::error::Result;
use crate::common::{AccessType, MachineFault, RegName, Word};
use crate::core::units::alu::{Alu, AluOp, CcUpdate, Operands};
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::Opcode;

/// What a single micro-step achieved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A micro-operation ran; the instruction is still in flight.
    Progress,
    /// The last micro-operation of an instruction ran.
    Retired,
    /// The machine is halted.
    Halted,
    /// IN is waiting for keyboard input.
    Waiting,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// HLT executed.
    Halted,
    /// IN is waiting for keyboard input.
    WaitingForInput,
    /// The instruction limit was reached.
    StepLimit,
}

/// Effect of one micro-operation on the sequence.
enum Flow {
    Next,
    /// End the instruction now (fault).
    Finish,
    Wait,
}

impl Cpu {
    /// Runs one micro-operation.
    ///
    /// Does nothing once halted, and nothing while waiting for input that has
    /// not yet arrived.
    ///
    /// # Errors
    ///
    /// Memory bounds violations and cache eviction livelock are fatal and
    /// returned; the machine state is left at the failing micro-step.
    pub fn micro_step(&mut self) -> Result<StepOutcome> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }
        self.step()
    }

    fn step(&mut self) -> Result<StepOutcome> {
        self.stats.micro_steps += 1;
        if self.trace {
            debug!(
                prog_step = self.prog_step,
                pc = self.reg(RegName::Pc),
                mar = self.reg(RegName::Mar),
                mdr = self.reg(RegName::Mdr),
                cc = self.reg(RegName::Cc),
                "micro-step"
            );
        }
        match self.prog_step {
            0 => {
                self.set_reg(RegName::Mar, self.reg(RegName::Pc));
                trace!(step = 0, pc = self.reg(RegName::Pc), "PC -> MAR");
            }
            1 => {
                let addr = self.reg(RegName::Mar) as usize;
                let word = self.memory.read(addr, AccessType::Fetch)?;
                self.set_reg(RegName::Mdr, word.value());
                trace!(step = 1, addr, word = %word, "M[MAR] -> MDR");
            }
            2 => {
                self.set_reg(RegName::Ir, self.reg(RegName::Mdr));
                trace!(step = 2, "MDR -> IR");
            }
            3 => self.decode_ir(),
            n => return self.execute_step(n),
        }
        self.prog_step += 1;
        Ok(StepOutcome::Progress)
    }

    fn decode_ir(&mut self) {
        let word = Word::new(self.reg(RegName::Ir));
        let decoded = decode(word);
        for &(reg, value) in decoded.fields() {
            self.set_reg(reg, value);
        }
        trace!(
            step = 3,
            pc = self.reg(RegName::Pc),
            ir = %word,
            inst = %disassemble(word),
            "decode"
        );
    }

    fn current_opcode(&self) -> Option<Opcode> {
        Opcode::from_bits(self.reg(RegName::Opcode))
    }

    fn execute_step(&mut self, step: u8) -> Result<StepOutcome> {
        let program = microcode::program(self.current_opcode());
        let index = usize::from(step - EXECUTE_STEP);
        let Some(&op) = program.get(index) else {
            // Only reachable if the opcode register was rewritten mid-instruction.
            self.complete_instruction();
            return Ok(StepOutcome::Retired);
        };
        trace!(step, ?op, "execute");

        match self.run_micro_op(op)? {
            Flow::Wait => Ok(StepOutcome::Waiting),
            Flow::Finish => {
                self.complete_instruction();
                Ok(StepOutcome::Retired)
            }
            Flow::Next if index + 1 == program.len() => {
                self.complete_instruction();
                if self.halted {
                    Ok(StepOutcome::Halted)
                } else {
                    Ok(StepOutcome::Retired)
                }
            }
            Flow::Next => {
                self.prog_step += 1;
                Ok(StepOutcome::Progress)
            }
        }
    }

    fn complete_instruction(&mut self) {
        if !self.jump_taken && !self.single_word {
            self.set_reg(RegName::Pc, self.reg(RegName::Pc) + 1);
        }
        self.jump_taken = false;
        self.single_word = false;
        self.pending_writeback = false;
        self.pair_low = None;
        self.prog_step = 0;
        self.stats.instructions_retired += 1;
    }

    fn target_reg(&self, target: Target) -> Option<RegName> {
        match target {
            Target::Gpr => Some(RegName::gpr(self.reg(RegName::R))),
            Target::Rx => Some(RegName::gpr(self.reg(RegName::Rx))),
            Target::Index => RegName::index_reg(self.reg(RegName::Ix)),
        }
    }

    fn write_target(&mut self, target: Target, value: u32) {
        let Some(reg) = self.target_reg(target) else {
            warn!(?target, "IX 0 selects no index register, write ignored");
            return;
        };
        self.set_reg(reg, value);
    }

    fn read_target(&self, target: Target) -> u32 {
        self.target_reg(target).map_or(0, |reg| self.reg(reg))
    }

    fn stage(&mut self, op1: u32, op2: u32) {
        self.set_reg(RegName::Op1, op1);
        self.set_reg(RegName::Op2, op2);
    }

    fn run_micro_op(&mut self, op: MicroOp) -> Result<Flow> {
        match op {
            MicroOp::EffectiveAddress { indexed } => {
                let _ = self.compute_effective_address(indexed)?;
            }
            MicroOp::EaToMar => self.set_reg(RegName::Mar, self.reg(RegName::Ea)),
            MicroOp::Load => {
                let addr = self.reg(RegName::Mar) as usize;
                let word = self.memory.read(addr, AccessType::Read)?;
                self.set_reg(RegName::Mdr, word.value());
            }
            MicroOp::Store => {
                let addr = self.reg(RegName::Mar) as usize;
                self.memory.write(addr, Word::new(self.reg(RegName::Mdr)))?;
            }
            MicroOp::MdrTo(target) => self.write_target(target, self.reg(RegName::Mdr)),
            MicroOp::ToMdr(target) => self.set_reg(RegName::Mdr, self.read_target(target)),
            MicroOp::StageMemOperand => {
                self.stage(self.read_target(Target::Gpr), self.reg(RegName::Mdr));
            }
            MicroOp::StageImmediate => {
                self.stage(self.read_target(Target::Gpr), self.reg(RegName::Addr));
            }
            MicroOp::StageDecrement => self.stage(self.read_target(Target::Gpr), 1),
            MicroOp::StageRegisterPair => {
                let ry = RegName::gpr(self.reg(RegName::Ry));
                self.stage(self.read_target(Target::Rx), self.reg(ry));
            }
            MicroOp::StageShift => {
                self.stage(self.read_target(Target::Gpr), self.reg(RegName::Count));
                self.set_reg(RegName::Op3, self.reg(RegName::Lr));
                self.set_reg(RegName::Op4, self.reg(RegName::Al));
            }
            MicroOp::CheckRegisterPair => {
                let valid = |sel: u32| sel == 0 || sel == 2;
                if !valid(self.reg(RegName::Rx)) || !valid(self.reg(RegName::Ry)) {
                    self.raise_fault(MachineFault::IllegalOpcode)?;
                    return Ok(Flow::Finish);
                }
            }
            MicroOp::Alu(alu_op) => self.run_alu(alu_op),
            MicroOp::WriteBack(target) => {
                if self.pending_writeback {
                    self.write_target(target, self.reg(RegName::Result));
                    self.pending_writeback = false;
                }
            }
            MicroOp::WriteBackPair => {
                if self.pending_writeback {
                    let rx = self.reg(RegName::Rx);
                    self.set_reg(RegName::gpr(rx), self.reg(RegName::Result));
                    if let Some(low) = self.pair_low.take() {
                        self.set_reg(RegName::gpr(rx + 1), low);
                    }
                    self.pending_writeback = false;
                }
            }
            MicroOp::Branch(cond) => {
                if self.branch_taken(cond) {
                    self.set_reg(RegName::Pc, self.reg(RegName::Ea));
                    self.jump_taken = true;
                }
            }
            MicroOp::SaveReturn => self.set_reg(RegName::R3, self.reg(RegName::Pc) + 1),
            MicroOp::Return => {
                self.set_reg(RegName::R0, self.reg(RegName::Addr));
                self.set_reg(RegName::Pc, self.reg(RegName::R3));
                self.jump_taken = true;
            }
            MicroOp::Input => {
                if !self.device_input() {
                    return Ok(Flow::Wait);
                }
            }
            MicroOp::Output => self.device_output(),
            MicroOp::Check => self.device_check(),
            MicroOp::Halt => {
                self.running = false;
                self.halted = true;
                self.panel.halted();
            }
            MicroOp::Trap => self.take_trap()?,
            MicroOp::Fault => {
                self.raise_fault(MachineFault::IllegalOpcode)?;
                return Ok(Flow::Finish);
            }
            MicroOp::Unimplemented => {
                warn!(
                    opcode = self.reg(RegName::Opcode),
                    pc = self.reg(RegName::Pc),
                    "opcode not modelled, executed as no-op"
                );
            }
        }
        Ok(Flow::Next)
    }

    fn run_alu(&mut self, op: AluOp) {
        let operands = Operands {
            op1: self.reg(RegName::Op1),
            op2: self.reg(RegName::Op2),
            op3: self.reg(RegName::Op3),
            op4: self.reg(RegName::Op4),
        };
        let outcome = Alu::execute(op, operands);

        if let Some(update) = outcome.cc {
            let mut cc = self.regs.register(RegName::Cc);
            match update {
                CcUpdate::Set(code) => cc.set_bit(code.bit(), true),
                CcUpdate::Clear(code) => cc.set_bit(code.bit(), false),
            }
            self.set_reg(RegName::Cc, cc.get());
        }

        self.pending_writeback = outcome.result.is_some();
        if let Some(result) = outcome.result {
            self.set_reg(RegName::Result, result);
            self.pair_low = outcome.extra;
        }
    }

    fn branch_taken(&self, cond: BranchCondition) -> bool {
        let value = Word::new(self.read_target(Target::Gpr));
        match cond {
            BranchCondition::Always => true,
            BranchCondition::Zero => value.value() == 0,
            BranchCondition::NonZero => value.value() != 0,
            BranchCondition::CcSet => self
                .regs
                .register(RegName::Cc)
                .bit(self.reg(RegName::R)),
            BranchCondition::NonNegative => !value.is_negative(),
            BranchCondition::Positive => value.signed() > 0,
        }
    }

    /// Runs micro-steps to the next instruction boundary. A partially executed
    /// instruction is finished rather than restarted.
    ///
    /// # Errors
    ///
    /// See [`micro_step`](Self::micro_step).
    pub fn macro_step(&mut self) -> Result<StepOutcome> {
        loop {
            match self.micro_step()? {
                StepOutcome::Progress => {}
                outcome => return Ok(outcome),
            }
        }
    }

    /// Continues until HLT or an input wait.
    ///
    /// # Errors
    ///
    /// See [`micro_step`](Self::micro_step).
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_until(None)
    }

    /// Continues until HLT, an input wait, or `max_instructions` instructions
    /// have completed.
    ///
    /// # Errors
    ///
    /// See [`micro_step`](Self::micro_step).
    pub fn run_until(&mut self, max_instructions: Option<u64>) -> Result<RunOutcome> {
        if self.halted {
            return Ok(RunOutcome::Halted);
        }
        self.running = true;
        let mut retired = 0;
        loop {
            if max_instructions.is_some_and(|limit| retired >= limit) {
                return Ok(RunOutcome::StepLimit);
            }
            match self.macro_step()? {
                StepOutcome::Halted => return Ok(RunOutcome::Halted),
                StepOutcome::Waiting => return Ok(RunOutcome::WaitingForInput),
                StepOutcome::Retired | StepOutcome::Progress => retired += 1,
            }
            if !self.running {
                return Ok(RunOutcome::Halted);
            }
        }
    }

    /// Executes a single encoded word as if it had just been fetched.
    ///
    /// PC is not advanced afterwards, but jumps, traps and faults in the word
    /// still redirect it. Any partially executed instruction is abandoned,
    /// including an IN waiting for input.
    /// `None` is a no-op.
    ///
    /// # Errors
    ///
    /// See [`micro_step`](Self::micro_step).
    pub fn execute_word(&mut self, word: Option<Word>) -> Result<StepOutcome> {
        let Some(word) = word else {
            return Ok(StepOutcome::Retired);
        };

        self.jump_taken = false;
        self.pending_writeback = false;
        self.pair_low = None;
        self.waiting = false;
        self.single_word = true;
        self.set_reg(RegName::Mdr, word.value());
        self.prog_step = 2;

        loop {
            match self.step()? {
                StepOutcome::Progress => {}
                outcome => return Ok(outcome),
            }
        }
    }
}
