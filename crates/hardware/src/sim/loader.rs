//! Program Image Loader.
//!
//! This module reads pre-encoded program images into memory. It performs:
//! 1. **Parsing:** One `ADDRESS WORD` pair per line, both in octal. Blank lines and
//!    anything after `#` are ignored.
//! 2. **Loading:** Places each word directly in main memory through [`Cpu::load_word`].
//!
//! ```text
//! # replicate M[5] into M[20]
//! 000010 030005
//! 000011 020024
//! 000012 000000
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::constants::WORD_MASK;
use crate::common::error::{Result, SimError};
use crate::common::Word;
use crate::core::Cpu;

/// One `(address, word)` pair of a program image.
pub type ImageEntry = (usize, Word);

fn parse_octal(field: &str, what: &str, line: usize) -> Result<u32> {
    u32::from_str_radix(field, 8).map_err(|e| SimError::Parse {
        line,
        message: format!("invalid octal {what} '{field}': {e}"),
    })
}

/// Parses program image text.
///
/// # Errors
///
/// [`SimError::Parse`] with the 1-based line number for a line that is not
/// exactly two octal numbers, or whose word does not fit in 18 bits.
pub fn parse_image(text: &str) -> Result<Vec<ImageEntry>> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut fields = content.split_whitespace();
        let (Some(addr), Some(word), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(SimError::Parse {
                line,
                message: format!("expected 'ADDRESS WORD', found '{content}'"),
            });
        };

        let addr = parse_octal(addr, "address", line)?;
        let word = parse_octal(word, "word", line)?;
        if word > WORD_MASK {
            return Err(SimError::Parse {
                line,
                message: format!("word {word:o} exceeds 18 bits"),
            });
        }
        entries.push((addr as usize, Word::new(word)));
    }
    Ok(entries)
}

/// Reads and parses a program image file.
///
/// # Errors
///
/// [`SimError::Io`] when the file cannot be read, otherwise as [`parse_image`].
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<ImageEntry>> {
    let text = fs::read_to_string(path)?;
    parse_image(&text)
}

/// Places every image entry in main memory.
///
/// # Errors
///
/// [`SimError::AddressOutOfRange`] for an entry outside main memory.
pub fn load_image(cpu: &mut Cpu, image: &[ImageEntry]) -> Result<()> {
    for &(addr, word) in image {
        cpu.load_word(addr, word)?;
    }
    debug!(words = image.len(), "program image loaded");
    Ok(())
}
