//! Device I/O.
//!
//! IN, OUT and CHK address a device by the DEVID field. An IN on the keyboard
//! with nothing queued does not fail: it raises the waiting flag and leaves
//! the micro-step where it is, so the same operation runs again once
//! [`Cpu::provide_input`] has supplied characters.

use tracing::warn;

use super::Cpu;
use crate::common::constants::DEV_KEYBOARD;
use crate::common::{RegName, Word};

impl Cpu {
    /// IN. Returns `false` when the engine must wait for input.
    pub(crate) fn device_input(&mut self) -> bool {
        let id = self.reg(RegName::DevId);
        let target = RegName::gpr(self.reg(RegName::R));

        let value = match self.devices.get_mut(id) {
            Some(device) => device.read(),
            None => {
                warn!(devid = id, "IN from unattached device");
                Some(Word::ZERO)
            }
        };

        match value {
            Some(word) => {
                self.waiting = false;
                self.set_reg(target, word.value());
                true
            }
            None if id == DEV_KEYBOARD => {
                if !self.waiting {
                    self.waiting = true;
                    self.stats.input_waits += 1;
                    self.panel.waiting_for_input();
                }
                false
            }
            None => {
                self.set_reg(target, 0);
                true
            }
        }
    }

    /// OUT.
    pub(crate) fn device_output(&mut self) {
        let id = self.reg(RegName::DevId);
        let word = Word::new(self.reg(RegName::gpr(self.reg(RegName::R))));

        let Some(device) = self.devices.get_mut(id) else {
            warn!(devid = id, "OUT to unattached device");
            return;
        };
        if let Some(ch) = device.write(word) {
            self.stats.chars_printed += 1;
            self.panel.terminal_output(ch);
        }
    }

    /// CHK.
    pub(crate) fn device_check(&mut self) {
        let id = self.reg(RegName::DevId);
        let ready = self.devices.get(id).is_some_and(|d| d.is_ready());
        self.set_reg(RegName::gpr(self.reg(RegName::R)), u32::from(ready));
    }
}
