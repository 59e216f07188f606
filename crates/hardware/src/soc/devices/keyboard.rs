//! Keyboard.
//!
//! Characters typed at the front panel are queued here and consumed one per
//! IN instruction. An empty queue is what puts the engine into its
//! waiting-for-input state.

use std::collections::VecDeque;

use crate::common::Word;
use crate::soc::traits::Device;

/// Keyboard input queue.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    rx_queue: VecDeque<char>,
}

impl Keyboard {
    /// Appends every character of `text` to the queue.
    pub fn push_str(&mut self, text: &str) {
        self.rx_queue.extend(text.chars());
    }

    /// Number of characters not yet consumed.
    pub fn pending(&self) -> usize {
        self.rx_queue.len()
    }

    /// Discards unread input.
    pub fn clear(&mut self) {
        self.rx_queue.clear();
    }
}

impl Device for Keyboard {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn is_ready(&self) -> bool {
        !self.rx_queue.is_empty()
    }

    fn read(&mut self) -> Option<Word> {
        self.rx_queue.pop_front().map(|ch| Word::new(u32::from(ch)))
    }
}
