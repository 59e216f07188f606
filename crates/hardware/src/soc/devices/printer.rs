//! Printer.

use crate::common::Word;
use crate::soc::traits::Device;

/// Collects the characters written by OUT.
#[derive(Clone, Debug, Default)]
pub struct Printer {
    output: String,
}

impl Printer {
    /// Everything printed so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Removes and returns the printed text.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Device for Printer {
    fn name(&self) -> &str {
        "printer"
    }

    fn is_ready(&self) -> bool {
        true
    }

    /// Prints the low 8 bits of `word`.
    fn write(&mut self, word: Word) -> Option<char> {
        let ch = char::from((word.value() & 0xFF) as u8);
        self.output.push(ch);
        Some(ch)
    }
}
