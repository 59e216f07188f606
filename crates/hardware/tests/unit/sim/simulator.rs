//! Simulator Facade Tests.

use std::io::Write;

use vnsim_core::common::{RegName, SimError};
use vnsim_core::config::Config;
use vnsim_core::core::cpu::RunOutcome;
use vnsim_core::Simulator;

fn image_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn loads_and_runs_an_image() {
    let file = image_file(&[
        "# LDA R0,0,5 / STR R0,0,20 / HLT",
        "000005 000606",
        "000010 030005",
        "000011 020024",
        "000012 000000",
    ]);
    let mut sim = Simulator::new(&Config::default()).unwrap();
    assert!(sim.controller_running());
    assert_eq!(sim.load_program(file.path()).unwrap(), 4);
    assert_eq!(sim.cpu.reg(RegName::Pc), 0o10);

    assert_eq!(sim.run(None).unwrap(), RunOutcome::Halted);
    assert_eq!(sim.cpu.reg(RegName::R0), 0o606);

    sim.shutdown();
    assert!(!sim.controller_running());
    assert_eq!(sim.memory().peek_store(20).unwrap().value(), 0o606);
    assert!(sim.memory_stats().drains >= 1);
}

#[test]
fn image_outside_memory_is_rejected() {
    let file = image_file(&["004000 000000"]);
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let err = sim.load_program(file.path()).unwrap_err();
    assert!(matches!(err, SimError::AddressOutOfRange { address: 2048, .. }));
}

#[test]
fn stores_after_shutdown_fail() {
    let file = image_file(&["000010 020024", "000011 000000"]);
    let mut sim = Simulator::new(&Config::default()).unwrap();
    let _ = sim.load_program(file.path()).unwrap();
    sim.shutdown();
    assert!(matches!(sim.run(None), Err(SimError::ControllerStopped)));
}

#[test]
fn simulators_are_independent() {
    let a = Simulator::new(&Config::default()).unwrap();
    let mut b = Simulator::new(&Config::default()).unwrap();
    b.cpu.set_reg(RegName::R1, 5);
    assert_eq!(a.cpu.reg(RegName::R1), 0);
    b.shutdown();
    assert!(a.controller_running());
}
