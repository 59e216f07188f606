//! Character devices.
//!
//! The machine has two: a keyboard fed from the front panel's input line and
//! a printer that collects terminal output. Both are addressed by DEVID.

/// Keyboard input queue (DEVID 0).
pub mod keyboard;

/// Printer output (DEVID 1).
pub mod printer;

pub use keyboard::Keyboard;
pub use printer::Printer;

pub use crate::soc::traits::Device;

use crate::common::constants::{DEV_KEYBOARD, DEV_PRINTER};

/// The fixed set of attached devices, routed by device id.
#[derive(Debug, Default)]
pub struct Devices {
    /// Keyboard.
    pub keyboard: Keyboard,
    /// Printer.
    pub printer: Printer,
}

impl Devices {
    /// Routes a DEVID to its device; `None` for an unattached id.
    pub const fn get_mut(&mut self, id: u32) -> Option<&mut dyn Device> {
        match id {
            DEV_KEYBOARD => Some(&mut self.keyboard),
            DEV_PRINTER => Some(&mut self.printer),
            _ => None,
        }
    }

    /// Read-only routing, used by CHK.
    pub const fn get(&self, id: u32) -> Option<&dyn Device> {
        match id {
            DEV_KEYBOARD => Some(&self.keyboard),
            DEV_PRINTER => Some(&self.printer),
            _ => None,
        }
    }
}
