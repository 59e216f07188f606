//! Instruction encoding and field layout tables.
//!
//! Provides the bit ranges of every instruction field, the six field layouts
//! (one per instruction class), and bit extraction helpers for 18-bit
//! instruction words. Bit 0 is the most significant bit; ranges are inclusive.

use crate::common::{RegName, Word};

/// Opcode field: bits 0-5, common to every class.
pub const OPCODE_BITS: (u32, u32) = (0, 5);
/// Index register selector (load/store class).
pub const IX_BITS: (u32, u32) = (6, 7);
/// General register selector (load/store, shift and I/O classes).
pub const R_BITS: (u32, u32) = (8, 9);
/// Indirect addressing bit (load/store class).
pub const I_BITS: (u32, u32) = (10, 10);
/// Address or immediate field (load/store class).
pub const ADDR_BITS: (u32, u32) = (11, 17);
/// First register of a register-register instruction.
pub const RX_BITS: (u32, u32) = (6, 7);
/// Second register of a register-register instruction.
pub const RY_BITS: (u32, u32) = (8, 9);
/// Arithmetic (0) / logical (1) shift selector.
pub const AL_BITS: (u32, u32) = (10, 10);
/// Right (0) / left (1) shift selector.
pub const LR_BITS: (u32, u32) = (11, 11);
/// Shift or rotate count.
pub const COUNT_BITS: (u32, u32) = (13, 17);
/// Device id (I/O class).
pub const DEVID_BITS: (u32, u32) = (14, 17);
/// Opcode-specific suffix of `HLT` and `TRAP`.
pub const TRAPCODE_BITS: (u32, u32) = (12, 17);

/// Instruction classes; each selects one field layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// `HLT`.
    Halt,
    /// `TRAP code`.
    Trap,
    /// Loads, stores, jumps and immediate arithmetic: `IX R I ADDR`.
    LoadStore,
    /// Register-register arithmetic and logic: `RX RY`.
    RegisterRegister,
    /// Shift and rotate: `R AL LR COUNT`.
    ShiftRotate,
    /// Device I/O: `R DEVID`.
    Io,
    /// Opcode without a class; the engine takes the illegal-opcode fault.
    Illegal,
}

/// One field of a layout: the register it is scattered into and its bit range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Destination field register.
    pub reg: RegName,
    /// First bit (MSB side).
    pub start: u32,
    /// Last bit (LSB side).
    pub end: u32,
}

impl FieldSpec {
    const fn new(reg: RegName, bits: (u32, u32)) -> Self {
        Self {
            reg,
            start: bits.0,
            end: bits.1,
        }
    }

    /// Extracts this field from a word.
    #[inline]
    pub const fn extract(&self, word: Word) -> u32 {
        word.field(self.start, self.end)
    }
}

const LOAD_STORE_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(RegName::Ix, IX_BITS),
    FieldSpec::new(RegName::R, R_BITS),
    FieldSpec::new(RegName::I, I_BITS),
    FieldSpec::new(RegName::Addr, ADDR_BITS),
];

const REGISTER_REGISTER_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(RegName::Rx, RX_BITS),
    FieldSpec::new(RegName::Ry, RY_BITS),
];

const SHIFT_ROTATE_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(RegName::R, R_BITS),
    FieldSpec::new(RegName::Al, AL_BITS),
    FieldSpec::new(RegName::Lr, LR_BITS),
    FieldSpec::new(RegName::Count, COUNT_BITS),
];

const IO_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(RegName::R, R_BITS),
    FieldSpec::new(RegName::DevId, DEVID_BITS),
];

const SUFFIX_LAYOUT: &[FieldSpec] = &[FieldSpec::new(RegName::TrapCode, TRAPCODE_BITS)];

impl InstructionClass {
    /// Field layout for this class, excluding the opcode field.
    pub const fn layout(self) -> &'static [FieldSpec] {
        match self {
            Self::Halt | Self::Trap => SUFFIX_LAYOUT,
            Self::LoadStore => LOAD_STORE_LAYOUT,
            Self::RegisterRegister => REGISTER_REGISTER_LAYOUT,
            Self::ShiftRotate => SHIFT_ROTATE_LAYOUT,
            Self::Io => IO_LAYOUT,
            Self::Illegal => &[],
        }
    }
}

/// Field extraction on encoded instruction words.
///
/// These read the raw bits regardless of class; use [`InstructionClass::layout`]
/// to know which fields are meaningful for a given opcode.
pub trait InstructionBits {
    /// Opcode (bits 0-5).
    fn opcode(&self) -> u32;
    /// Index register selector (bits 6-7).
    fn ix(&self) -> u32;
    /// General register selector (bits 8-9).
    fn r(&self) -> u32;
    /// Indirect bit (bit 10).
    fn indirect(&self) -> bool;
    /// Address / immediate (bits 11-17).
    fn address(&self) -> u32;
    /// Register-register first operand (bits 6-7).
    fn rx(&self) -> u32;
    /// Register-register second operand (bits 8-9).
    fn ry(&self) -> u32;
    /// Logical shift selector (bit 10).
    fn al(&self) -> u32;
    /// Left shift selector (bit 11).
    fn lr(&self) -> u32;
    /// Shift count (bits 13-17).
    fn count(&self) -> u32;
    /// Device id (bits 14-17).
    fn dev_id(&self) -> u32;
    /// Trap code (bits 12-17).
    fn trap_code(&self) -> u32;
}

impl InstructionBits for Word {
    #[inline]
    fn opcode(&self) -> u32 {
        self.field(OPCODE_BITS.0, OPCODE_BITS.1)
    }

    #[inline]
    fn ix(&self) -> u32 {
        self.field(IX_BITS.0, IX_BITS.1)
    }

    #[inline]
    fn r(&self) -> u32 {
        self.field(R_BITS.0, R_BITS.1)
    }

    #[inline]
    fn indirect(&self) -> bool {
        self.field(I_BITS.0, I_BITS.1) == 1
    }

    #[inline]
    fn address(&self) -> u32 {
        self.field(ADDR_BITS.0, ADDR_BITS.1)
    }

    #[inline]
    fn rx(&self) -> u32 {
        self.field(RX_BITS.0, RX_BITS.1)
    }

    #[inline]
    fn ry(&self) -> u32 {
        self.field(RY_BITS.0, RY_BITS.1)
    }

    #[inline]
    fn al(&self) -> u32 {
        self.field(AL_BITS.0, AL_BITS.1)
    }

    #[inline]
    fn lr(&self) -> u32 {
        self.field(LR_BITS.0, LR_BITS.1)
    }

    #[inline]
    fn count(&self) -> u32 {
        self.field(COUNT_BITS.0, COUNT_BITS.1)
    }

    #[inline]
    fn dev_id(&self) -> u32 {
        self.field(DEVID_BITS.0, DEVID_BITS.1)
    }

    #[inline]
    fn trap_code(&self) -> u32 {
        self.field(TRAPCODE_BITS.0, TRAPCODE_BITS.1)
    }
}
