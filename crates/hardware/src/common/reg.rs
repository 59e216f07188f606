//! Registers and the Register File.
//!
//! This module provides the fixed-width register cell and the enum-indexed register file.
//! It provides:
//! 1. **Bit Register:** A named width that never changes; writes keep the low-order bits.
//! 2. **Naming:** `RegName` replaces string lookup with a dense enum index.
//! 3. **Observability:** Snapshots and bit-string rendering for the front panel and dumps.
//!
//! Throughout the machine, bit 0 of a register is its most significant bit.

use std::fmt;

/// Every named register of the machine, architectural and scratch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegName {
    /// General purpose register 0.
    R0,
    /// General purpose register 1.
    R1,
    /// General purpose register 2.
    R2,
    /// General purpose register 3 (link register for `JSR`/`RFS`).
    R3,
    /// Index register 1.
    X1,
    /// Index register 2.
    X2,
    /// Index register 3.
    X3,
    /// Program counter.
    Pc,
    /// Instruction register.
    Ir,
    /// Condition code.
    Cc,
    /// Memory address register.
    Mar,
    /// Memory data register.
    Mdr,
    /// Machine status register.
    Msr,
    /// Machine fault register.
    Mfr,
    /// Decoded opcode.
    Opcode,
    /// Decoded general register selector.
    R,
    /// Decoded index register selector.
    Ix,
    /// Decoded indirect bit.
    I,
    /// Decoded address / immediate field.
    Addr,
    /// Decoded first register of a register-register instruction.
    Rx,
    /// Decoded second register of a register-register instruction.
    Ry,
    /// Decoded arithmetic/logical shift selector.
    Al,
    /// Decoded left/right shift selector.
    Lr,
    /// Decoded shift count.
    Count,
    /// Decoded device id.
    DevId,
    /// Decoded trap code.
    TrapCode,
    /// Effective address.
    Ea,
    /// ALU operand 1.
    Op1,
    /// ALU operand 2.
    Op2,
    /// ALU operand 3.
    Op3,
    /// ALU operand 4 (second half of a result pair).
    Op4,
    /// ALU result.
    Result,
}

impl RegName {
    /// Number of registers in the file.
    pub const COUNT: usize = 32;

    /// All register names in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::X1,
        Self::X2,
        Self::X3,
        Self::Pc,
        Self::Ir,
        Self::Cc,
        Self::Mar,
        Self::Mdr,
        Self::Msr,
        Self::Mfr,
        Self::Opcode,
        Self::R,
        Self::Ix,
        Self::I,
        Self::Addr,
        Self::Rx,
        Self::Ry,
        Self::Al,
        Self::Lr,
        Self::Count,
        Self::DevId,
        Self::TrapCode,
        Self::Ea,
        Self::Op1,
        Self::Op2,
        Self::Op3,
        Self::Op4,
        Self::Result,
    ];

    /// Dense index into the register file.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Width in bits, fixed for the life of the machine.
    pub const fn width(self) -> u32 {
        match self {
            Self::Pc | Self::Mar | Self::Ea => 12,
            Self::Cc | Self::Mfr | Self::DevId => 4,
            Self::Opcode | Self::TrapCode => 6,
            Self::Addr => 7,
            Self::Count => 5,
            Self::R | Self::Ix | Self::Rx | Self::Ry => 2,
            Self::I | Self::Al | Self::Lr => 1,
            _ => 18,
        }
    }

    /// Front panel label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::R0 => "R0",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::X1 => "X1",
            Self::X2 => "X2",
            Self::X3 => "X3",
            Self::Pc => "PC",
            Self::Ir => "IR",
            Self::Cc => "CC",
            Self::Mar => "MAR",
            Self::Mdr => "MDR",
            Self::Msr => "MSR",
            Self::Mfr => "MFR",
            Self::Opcode => "OPCODE",
            Self::R => "R",
            Self::Ix => "IX",
            Self::I => "I",
            Self::Addr => "ADDR",
            Self::Rx => "RX",
            Self::Ry => "RY",
            Self::Al => "AL",
            Self::Lr => "LR",
            Self::Count => "COUNT",
            Self::DevId => "DEVID",
            Self::TrapCode => "TRAPCODE",
            Self::Ea => "EA",
            Self::Op1 => "OP1",
            Self::Op2 => "OP2",
            Self::Op3 => "OP3",
            Self::Op4 => "OP4",
            Self::Result => "RESULT",
        }
    }

    /// General purpose register selected by a 2-bit field.
    pub const fn gpr(selector: u32) -> Self {
        match selector & 0b11 {
            0 => Self::R0,
            1 => Self::R1,
            2 => Self::R2,
            _ => Self::R3,
        }
    }

    /// Index register selected by a 2-bit field; selector 0 means "no index".
    pub const fn index_reg(selector: u32) -> Option<Self> {
        match selector & 0b11 {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            3 => Some(Self::X3),
            _ => None,
        }
    }
}

impl fmt::Display for RegName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-width bit register.
///
/// Writes keep the low-order `width` bits of the supplied value, so encoding
/// any out-of-range integer truncates deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    width: u32,
    value: u32,
}

impl Register {
    /// Creates a zeroed register of `width` bits (1..=32).
    pub const fn new(width: u32) -> Self {
        Self { width, value: 0 }
    }

    /// Creates a register holding `value` truncated to `width` bits.
    pub const fn with_value(width: u32, value: u32) -> Self {
        Self {
            width,
            value: value & Self::mask_for(width),
        }
    }

    const fn mask_for(width: u32) -> u32 {
        if width >= 32 {
            u32::MAX
        } else {
            (1 << width) - 1
        }
    }

    /// Width in bits.
    #[inline]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Mask of all representable bits.
    #[inline]
    pub const fn mask(self) -> u32 {
        Self::mask_for(self.width)
    }

    /// Current contents.
    #[inline]
    pub const fn get(self) -> u32 {
        self.value
    }

    /// Replaces the contents, keeping the low-order bits.
    #[inline]
    pub const fn set(&mut self, value: u32) {
        self.value = value & self.mask();
    }

    /// Reads bit `i`, where bit 0 is the most significant bit.
    pub const fn bit(self, i: u32) -> bool {
        i < self.width && (self.value >> (self.width - 1 - i)) & 1 == 1
    }

    /// Sets or clears bit `i`, where bit 0 is the most significant bit.
    /// Out-of-range indices are ignored.
    pub const fn set_bit(&mut self, i: u32, on: bool) {
        if i >= self.width {
            return;
        }
        let m = 1 << (self.width - 1 - i);
        if on {
            self.value |= m;
        } else {
            self.value &= !m;
        }
    }

    /// Renders the register as a string of `width` binary digits, MSB first.
    pub fn to_bit_string(self) -> String {
        (0..self.width)
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }

    /// Parses a string of binary digits, MSB first. The register width is the
    /// string length; `None` for empty input, anything other than `0`/`1`, or
    /// more than 32 digits.
    pub fn from_bit_string(bits: &str) -> Option<Self> {
        let width = u32::try_from(bits.len()).ok()?;
        if width == 0 || width > 32 {
            return None;
        }
        let mut value = 0u32;
        for c in bits.chars() {
            value = (value << 1)
                | match c {
                    '0' => 0,
                    '1' => 1,
                    _ => return None,
                };
        }
        Some(Self { width, value })
    }
}

/// Register file: one register per [`RegName`], indexed by the enum.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: [Register; RegName::COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed at its fixed width.
    pub fn new() -> Self {
        Self {
            regs: RegName::ALL.map(|name| Register::new(name.width())),
        }
    }

    /// Reads a register.
    #[inline]
    pub const fn read(&self, name: RegName) -> u32 {
        self.regs[name.index()].get()
    }

    /// Writes a register and returns the value actually stored after truncation.
    #[inline]
    pub const fn write(&mut self, name: RegName, value: u32) -> u32 {
        let reg = &mut self.regs[name.index()];
        reg.set(value);
        reg.get()
    }

    /// Returns a copy of the register cell.
    pub const fn register(&self, name: RegName) -> Register {
        self.regs[name.index()]
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        for reg in &mut self.regs {
            reg.set(0);
        }
    }

    /// Name/value pairs for every register, in index order.
    pub fn snapshot(&self) -> Vec<(RegName, u32)> {
        RegName::ALL.iter().map(|&n| (n, self.read(n))).collect()
    }

    /// Architectural registers formatted one per line, for dumps.
    pub fn dump(&self) -> String {
        use std::fmt::Write as _;
        let mut out = String::new();
        for name in RegName::ALL.iter().take(RegName::Mfr.index() + 1) {
            let reg = self.register(*name);
            let _ = writeln!(
                out,
                "{:>4} = {:06o}  {}",
                name.name(),
                reg.get(),
                reg.to_bit_string()
            );
        }
        out
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
