//! Collaborator traits.
//!
//! This module defines the two seams between the engine and the outside world:
//! 1. **`FrontPanel`:** Observer notified of register writes, terminal output and halts.
//! 2. **`Device`:** Character devices addressed by the I/O instructions' DEVID field.

use crate::common::{RegName, Word};

/// Observer of machine state, in the role of an operator's console.
///
/// Every method has an empty default so an implementor only overrides what it
/// displays. Calls are made synchronously from the engine thread.
pub trait FrontPanel: Send {
    /// A register was written; `value` is the stored (truncated) value.
    fn register_changed(&mut self, _name: RegName, _value: u32) {}

    /// The printer emitted a character.
    fn terminal_output(&mut self, _ch: char) {}

    /// The machine executed HLT; interactive controls should be disabled.
    fn halted(&mut self) {}

    /// An IN instruction is waiting for keyboard input.
    fn waiting_for_input(&mut self) {}
}

/// Panel that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPanel;

impl FrontPanel for NullPanel {}

/// A character device reachable through IN, OUT and CHK.
pub trait Device: Send {
    /// Short name used in logs (e.g. `"keyboard"`).
    fn name(&self) -> &str;

    /// Status reported by CHK.
    fn is_ready(&self) -> bool;

    /// Takes the next input word, or `None` when nothing is available.
    fn read(&mut self) -> Option<Word> {
        None
    }

    /// Accepts an output word. Returns the character emitted, if any.
    fn write(&mut self, _word: Word) -> Option<char> {
        None
    }
}
