//! Memory Controller Tests.
//!
//! These start the real drain thread, so they exercise the blocking handoff
//! between a writer and the controller.

use std::thread;

use vnsim_core::common::{SimError, Word};
use vnsim_core::config::Config;
use vnsim_core::soc::{Memory, MemoryController};

fn drained(memory: &Memory, addr: usize) -> u32 {
    memory.flush();
    memory.peek_store(addr).unwrap().value()
}

#[test]
fn controller_drains_queued_stores() {
    let memory = Memory::new(&Config::default());
    let controller = MemoryController::spawn(&memory).unwrap();
    assert!(controller.is_running());

    for addr in 0..10 {
        memory.write(100 + addr, Word::new(addr as u32 + 1)).unwrap();
    }
    for addr in 0..10 {
        assert_eq!(drained(&memory, 100 + addr), addr as u32 + 1);
    }
    assert_eq!(memory.stats().drains, 10);
}

#[test]
fn fifth_store_completes_only_after_a_drain() {
    let memory = Memory::new(&Config::default());
    let _controller = MemoryController::spawn(&memory).unwrap();

    for addr in 0..5 {
        memory.write(addr, Word::new(addr as u32)).unwrap();
        assert!(memory.pending_writes() <= 4);
    }
    // Five entries through a four-entry buffer: the controller drained at least one.
    assert!(memory.stats().drains >= 1);
    assert_eq!(drained(&memory, 4), 4);
}

#[test]
fn shutdown_drains_then_rejects_stores() {
    let memory = Memory::new(&Config::default());
    let mut controller = MemoryController::spawn(&memory).unwrap();
    memory.write(30, Word::new(7)).unwrap();
    memory.write(31, Word::new(8)).unwrap();

    controller.shutdown();
    assert!(!controller.is_running());
    assert_eq!(memory.pending_writes(), 0);
    assert_eq!(memory.peek_store(31).unwrap(), Word::new(8));

    assert!(matches!(
        memory.write(32, Word::new(9)),
        Err(SimError::ControllerStopped)
    ));
    controller.shutdown();
}

#[test]
fn drop_joins_the_thread() {
    let memory = Memory::new(&Config::default());
    {
        let _controller = MemoryController::spawn(&memory).unwrap();
        memory.write(50, Word::new(0o777)).unwrap();
    }
    assert_eq!(memory.peek_store(50).unwrap(), Word::new(0o777));
}

#[test]
fn concurrent_stores_all_land() {
    let memory = Memory::new(&Config::default());
    let _controller = MemoryController::spawn(&memory).unwrap();

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let memory = memory.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let addr = 200 + t * 25 + i;
                    memory.write(addr, Word::new(addr as u32)).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    memory.flush();
    for addr in 200..300 {
        assert_eq!(memory.peek_store(addr).unwrap().value(), addr as u32);
    }
}
