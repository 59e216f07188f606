use std::sync::{Arc, Mutex};

use mockall::mock;
use vnsim_core::common::RegName;
use vnsim_core::soc::FrontPanel;

mock! {
    pub Panel {}

    impl FrontPanel for Panel {
        fn register_changed(&mut self, name: RegName, value: u32);
        fn terminal_output(&mut self, ch: char);
        fn halted(&mut self);
        fn waiting_for_input(&mut self);
    }
}

/// Everything a panel was told, in order.
#[derive(Clone, Debug, Default)]
pub struct PanelLog {
    pub registers: Vec<(RegName, u32)>,
    pub output: String,
    pub halts: usize,
    pub waits: usize,
}

/// Panel that records into a shared log the test keeps a handle to.
#[derive(Clone, Default)]
pub struct RecordingPanel {
    pub log: Arc<Mutex<PanelLog>>,
}

impl RecordingPanel {
    pub fn new() -> (Self, Arc<Mutex<PanelLog>>) {
        let panel = Self::default();
        let log = Arc::clone(&panel.log);
        (panel, log)
    }
}

impl FrontPanel for RecordingPanel {
    fn register_changed(&mut self, name: RegName, value: u32) {
        self.log.lock().unwrap().registers.push((name, value));
    }

    fn terminal_output(&mut self, ch: char) {
        self.log.lock().unwrap().output.push(ch);
    }

    fn halted(&mut self) {
        self.log.lock().unwrap().halts += 1;
    }

    fn waiting_for_input(&mut self) {
        self.log.lock().unwrap().waits += 1;
    }
}
