//! Instruction Decoder.
//!
//! This module classifies an 18-bit instruction word by opcode and extracts the
//! fields of the class layout. The result is a plain value; the engine scatters
//! it into the field registers, which is the decoder's only effect on machine state.

use crate::common::{RegName, Word};
use crate::isa::instruction::{InstructionBits, InstructionClass, OPCODE_BITS};
use crate::isa::opcodes::Opcode;

/// Maximum number of fields in any layout, opcode included.
const MAX_FIELDS: usize = 5;

/// A decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The instruction word as fetched.
    pub word: Word,
    /// Raw opcode bits, kept even when the opcode is not recognised.
    pub raw_opcode: u32,
    /// Recognised opcode, `None` for the illegal class.
    pub opcode: Option<Opcode>,
    /// Field layout class.
    pub class: InstructionClass,
    fields: [(RegName, u32); MAX_FIELDS],
    len: usize,
}

impl Decoded {
    /// Field register assignments produced by this decode, opcode first.
    pub fn fields(&self) -> &[(RegName, u32)] {
        &self.fields[..self.len]
    }

    /// Value decoded into `reg`, or `None` if the layout does not carry it.
    pub fn field(&self, reg: RegName) -> Option<u32> {
        self.fields()
            .iter()
            .find_map(|&(r, v)| (r == reg).then_some(v))
    }

    /// True when the engine must take the illegal-opcode fault.
    pub fn is_illegal(&self) -> bool {
        self.class == InstructionClass::Illegal
    }
}

/// Decodes an instruction word.
///
/// The opcode is always extracted into `OPCODE`. Recognised opcodes then
/// contribute the fields of their class layout; unrecognised opcodes fall into
/// [`InstructionClass::Illegal`] with no further fields.
///
/// # Examples
///
/// ```
/// use vnsim_core::common::{RegName, Word};
/// use vnsim_core::isa::decode::decode;
/// use vnsim_core::isa::opcodes::Opcode;
///
/// // LDR R1, X2, 7
/// let d = decode(Word::new(0o014407));
/// assert_eq!(d.opcode, Some(Opcode::Ldr));
/// assert_eq!(d.field(RegName::Ix), Some(2));
/// assert_eq!(d.field(RegName::R), Some(1));
/// assert_eq!(d.field(RegName::I), Some(0));
/// assert_eq!(d.field(RegName::Addr), Some(7));
/// ```
pub fn decode(word: Word) -> Decoded {
    let raw_opcode = word.opcode();
    let opcode = Opcode::from_bits(raw_opcode);
    let class = opcode.map_or(InstructionClass::Illegal, Opcode::class);

    let mut fields = [(RegName::Opcode, 0); MAX_FIELDS];
    fields[0] = (RegName::Opcode, word.field(OPCODE_BITS.0, OPCODE_BITS.1));
    let mut len = 1;
    for spec in class.layout() {
        fields[len] = (spec.reg, spec.extract(word));
        len += 1;
    }

    Decoded {
        word,
        raw_opcode,
        opcode,
        class,
        fields,
        len,
    }
}
