//! Fault and Trap Tests.
//!
//! Location 1 holds the fault handler address, 4 and 5 receive PC and MSR.
//! Location 0 holds the trap table base and 2 receives the trap return address.

use vnsim_core::common::{MachineFault, RegName};
use vnsim_core::core::cpu::RunOutcome;
use vnsim_core::isa::Opcode;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::{BOOT, TestContext};

const HANDLER: usize = 100;

fn with_handler(handler: &[I]) -> TestContext {
    let mut ctx = TestContext::new();
    ctx.poke(1, HANDLER as u32);
    for (i, inst) in handler.iter().enumerate() {
        ctx.poke(HANDLER + i, inst.build().value());
    }
    ctx
}

#[test]
fn illegal_opcode_enters_handler() {
    let mut ctx = with_handler(&[I::halt()]);
    ctx.load_program(&[I::new().raw_opcode(0o77), I::air(0, 1), I::halt()]);
    ctx.set_reg(RegName::Msr, 0o123);

    assert_eq!(ctx.run(), RunOutcome::Halted);
    assert_eq!(ctx.store(4), BOOT as u32, "faulting PC saved");
    assert_eq!(ctx.store(5), 0o123, "MSR saved");
    assert_eq!(ctx.reg(RegName::Mfr), 0b0010);
    assert_eq!(ctx.reg(RegName::Pc), HANDLER as u32 + 1);
    assert_eq!(ctx.reg(RegName::R0), 0, "the faulting program does not continue");
    assert_eq!(ctx.cpu().stats().faults_taken, 1);
}

#[test]
fn handler_runs_to_completion() {
    let mut ctx = with_handler(&[I::air(1, 1), I::air(1, 1), I::halt()]);
    ctx.load_program(&[I::new().raw_opcode(0o70)]);
    let _ = ctx.run();
    assert_eq!(ctx.reg(RegName::R1), 2);
}

#[test]
fn odd_register_pair_faults() {
    let mut ctx = with_handler(&[I::halt()]);
    ctx.load_program(&[I::rr(Opcode::Mlt, 1, 2), I::halt()]);
    ctx.set_reg(RegName::R1, 3).set_reg(RegName::R2, 4);

    let _ = ctx.run();
    assert_eq!(ctx.reg(RegName::Mfr), 0b0010);
    assert_eq!(ctx.reg(RegName::R1), 3);
    assert_eq!(ctx.reg(RegName::R2), 4);
    assert_eq!(ctx.reg(RegName::Pc), HANDLER as u32 + 1);
}

#[test]
fn trap_dispatches_through_table() {
    let mut ctx = TestContext::new();
    ctx.poke(0, 50);
    ctx.poke(53, 60);
    ctx.poke(60, I::air(1, 9).build().value());
    ctx.poke(61, I::ldr(2, 0, 2).build().value());
    ctx.poke(62, I::halt().build().value());
    ctx.load_program(&[I::trap(3), I::halt()]);

    assert_eq!(ctx.run(), RunOutcome::Halted);
    assert_eq!(ctx.reg(RegName::R1), 9);
    assert_eq!(ctx.reg(RegName::R2), BOOT as u32 + 1, "return address at location 2");
    assert_eq!(ctx.reg(RegName::Pc), 63);
    assert_eq!(ctx.cpu().stats().traps_taken, 1);
}

#[test]
fn trap_return_via_indirect_jump() {
    let mut ctx = TestContext::new();
    ctx.poke(0, 50);
    ctx.poke(50, 60);
    ctx.poke(60, I::air(1, 1).build().value());
    ctx.poke(61, I::jmp(2).indirect().build().value());
    ctx.load_program(&[I::trap(0), I::air(2, 1), I::halt()]);

    let _ = ctx.run();
    assert_eq!(ctx.reg(RegName::R1), 1);
    assert_eq!(ctx.reg(RegName::R2), 1, "execution resumed after the TRAP");
}

#[test]
fn trap_code_outside_table_faults() {
    let mut ctx = with_handler(&[I::halt()]);
    ctx.load_program(&[I::trap(16)]);

    let _ = ctx.run();
    assert_eq!(ctx.reg(RegName::Mfr), 0b0100);
    assert_eq!(ctx.store(4), BOOT as u32);
    assert_eq!(ctx.reg(RegName::Pc), HANDLER as u32 + 1);
    assert_eq!(ctx.cpu().stats().traps_taken, 0);
}

#[test]
fn only_the_middle_mfr_bits_are_used() {
    assert_eq!(MachineFault::IllegalTrapCode.mfr_bit(), 1);
    assert_eq!(MachineFault::IllegalOpcode.mfr_bit(), 2);

    let mut ctx = with_handler(&[I::halt()]);
    ctx.load_program(&[I::trap(16)]);
    let _ = ctx.run();
    assert_eq!(ctx.reg(RegName::Mfr) & 0b1001, 0);
}
