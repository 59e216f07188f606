//! Fluent encoder for instruction words.
//!
//! Field positions are MSB-first bit ranges of the 18-bit word, so a field
//! ending at bit `e` is shifted left by `17 - e`.

use vnsim_core::common::Word;
use vnsim_core::isa::Opcode;

fn place(value: u32, end: u32, width: u32) -> u32 {
    (value & ((1 << width) - 1)) << (17 - end)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionBuilder {
    opcode: u32,
    /// IX or RX, bits 6-7.
    hi_sel: u32,
    /// R or RY, bits 8-9.
    lo_sel: u32,
    /// I or AL, bit 10.
    bit10: u32,
    /// LR, bit 11 (shift layout only).
    bit11: u32,
    /// ADDR, COUNT, DEVID or TRAPCODE; occupies the low bits.
    low: u32,
    low_width: u32,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opcode(mut self, op: Opcode) -> Self {
        self.opcode = op.bits();
        self
    }

    pub fn raw_opcode(mut self, bits: u32) -> Self {
        self.opcode = bits;
        self
    }

    pub fn r(mut self, r: u32) -> Self {
        self.lo_sel = r;
        self
    }

    pub fn ix(mut self, ix: u32) -> Self {
        self.hi_sel = ix;
        self
    }

    pub fn indirect(mut self) -> Self {
        self.bit10 = 1;
        self
    }

    pub fn addr(mut self, addr: u32) -> Self {
        self.low = addr;
        self.low_width = 7;
        self
    }

    // --- Helpers for Common Instructions ---

    /// Load/store layout: `OP R, IX, ADDR`.
    pub fn ls(op: Opcode, r: u32, ix: u32, addr: u32) -> Self {
        Self::new().opcode(op).r(r).ix(ix).addr(addr)
    }

    pub fn ldr(r: u32, ix: u32, addr: u32) -> Self {
        Self::ls(Opcode::Ldr, r, ix, addr)
    }

    pub fn str(r: u32, ix: u32, addr: u32) -> Self {
        Self::ls(Opcode::Str, r, ix, addr)
    }

    pub fn lda(r: u32, ix: u32, addr: u32) -> Self {
        Self::ls(Opcode::Lda, r, ix, addr)
    }

    pub fn ldx(x: u32, addr: u32) -> Self {
        Self::ls(Opcode::Ldx, 0, x, addr)
    }

    pub fn stx(x: u32, addr: u32) -> Self {
        Self::ls(Opcode::Stx, 0, x, addr)
    }

    pub fn air(r: u32, imm: u32) -> Self {
        Self::ls(Opcode::Air, r, 0, imm)
    }

    pub fn sir(r: u32, imm: u32) -> Self {
        Self::ls(Opcode::Sir, r, 0, imm)
    }

    pub fn jmp(addr: u32) -> Self {
        Self::ls(Opcode::Jmp, 0, 0, addr)
    }

    /// Register-register layout: `OP RX, RY`.
    pub fn rr(op: Opcode, rx: u32, ry: u32) -> Self {
        Self {
            opcode: op.bits(),
            hi_sel: rx,
            lo_sel: ry,
            ..Self::default()
        }
    }

    /// Shift/rotate layout: `OP R, COUNT, LR, AL`.
    pub fn shift(op: Opcode, r: u32, count: u32, left: bool, logical: bool) -> Self {
        Self {
            opcode: op.bits(),
            lo_sel: r,
            bit10: u32::from(logical),
            bit11: u32::from(left),
            low: count,
            low_width: 5,
            ..Self::default()
        }
    }

    /// I/O layout: `OP R, DEVID`.
    pub fn io(op: Opcode, r: u32, dev: u32) -> Self {
        Self {
            opcode: op.bits(),
            lo_sel: r,
            low: dev,
            low_width: 4,
            ..Self::default()
        }
    }

    pub fn trap(code: u32) -> Self {
        Self {
            opcode: Opcode::Trap.bits(),
            low: code,
            low_width: 6,
            ..Self::default()
        }
    }

    pub fn halt() -> Self {
        Self::new().opcode(Opcode::Hlt)
    }

    pub fn build(self) -> Word {
        Word::new(
            place(self.opcode, 5, 6)
                | place(self.hi_sel, 7, 2)
                | place(self.lo_sel, 9, 2)
                | place(self.bit10, 10, 1)
                | place(self.bit11, 11, 1)
                | place(self.low, 17, self.low_width),
        )
    }
}

#[test]
fn builder_matches_reference_encodings() {
    assert_eq!(InstructionBuilder::ldr(1, 2, 7).build(), Word::new(0o014407));
    assert_eq!(
        InstructionBuilder::ldr(1, 2, 7).indirect().build(),
        Word::new(0o014607)
    );
    assert_eq!(InstructionBuilder::str(0, 0, 20).build(), Word::new(0o020024));
    assert_eq!(InstructionBuilder::halt().build(), Word::ZERO);
}
