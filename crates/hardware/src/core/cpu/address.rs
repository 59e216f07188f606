//! Effective Address Computation.
//!
//! `EA = ADDR (+ c(X[IX]) when indexing and IX != 0)`, truncated to the
//! 12-bit address width. With the indirect bit set, the word at that address
//! is fetched through the cache and becomes the EA. Indirection is a single
//! level: the fetched word is never dereferenced again.

use super::Cpu;
use crate::common::constants::ADDRESS_BITS;
use crate::common::error::Result;
use crate::common::{AccessType, RegName};

const ADDRESS_MASK: u32 = (1 << ADDRESS_BITS) - 1;

impl Cpu {
    /// Computes the effective address of the decoded instruction into EA.
    ///
    /// # Arguments
    ///
    /// * `indexed` - Whether a non-zero IX field adds its index register.
    ///
    /// # Errors
    ///
    /// Fails when the indirection word lies outside main memory.
    pub(crate) fn compute_effective_address(&mut self, indexed: bool) -> Result<u32> {
        let mut ea = self.reg(RegName::Addr);
        if indexed {
            if let Some(x) = RegName::index_reg(self.reg(RegName::Ix)) {
                ea += self.reg(x);
            }
        }
        ea &= ADDRESS_MASK;

        if self.reg(RegName::I) == 1 {
            ea = self.memory.read(ea as usize, AccessType::Read)?.value() & ADDRESS_MASK;
        }

        self.set_reg(RegName::Ea, ea);
        Ok(ea)
    }
}
