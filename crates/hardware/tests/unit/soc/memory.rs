//! Memory Subsystem Tests.
//!
//! No controller is started here, so queued stores stay in the write buffer
//! until `flush`, or a store into a full buffer, drains them on the test thread.

use pretty_assertions::assert_eq;
use vnsim_core::common::{AccessType, SimError, Word};
use vnsim_core::config::{Config, EvictionPolicy};
use vnsim_core::soc::Memory;

fn config_with(lines: usize, buffer: usize) -> Config {
    let mut config = Config::default();
    config.cache.lines = lines;
    config.cache.policy = EvictionPolicy::Fifo;
    config.memory.write_buffer_capacity = buffer;
    config
}

#[test]
fn store_is_visible_through_cache_before_drain() {
    let memory = Memory::new(&Config::default());
    memory.write(20, Word::new(0o1234)).unwrap();

    assert_eq!(memory.read(20, AccessType::Read).unwrap(), Word::new(0o1234));
    assert_eq!(memory.peek_store(20).unwrap(), Word::ZERO);
    assert_eq!(memory.pending_writes(), 1);

    memory.flush();
    assert_eq!(memory.peek_store(20).unwrap(), Word::new(0o1234));
    assert_eq!(memory.pending_writes(), 0);
    assert_eq!(memory.stats().drains, 1);
}

#[test]
fn dirty_bit_survives_until_last_store_drains() {
    let memory = Memory::new(&Config::default());
    memory.write(3, Word::new(1)).unwrap();
    memory.write(3, Word::new(2)).unwrap();
    assert_eq!(memory.pending_entries().len(), 2);

    let line = memory.cache_snapshot().into_iter().next().unwrap();
    assert!(line.is_word_dirty(3));

    memory.flush();
    let line = memory.cache_snapshot().into_iter().next().unwrap();
    assert!(!line.is_dirty());
    assert_eq!(memory.peek_store(3).unwrap(), Word::new(2));
}

#[test]
fn full_buffer_without_controller_drains_oldest_inline() {
    let memory = Memory::new(&Config::default());
    for addr in 0..5 {
        memory.write(40 + addr, Word::new(addr as u32 + 1)).unwrap();
    }

    assert_eq!(memory.pending_writes(), 4);
    assert_eq!(memory.peek_store(40).unwrap(), Word::new(1));
    assert_eq!(memory.peek_store(41).unwrap(), Word::ZERO);
    let stats = memory.stats();
    assert_eq!(stats.buffer_stalls, 1);
    assert_eq!(stats.drains, 1);
    assert_eq!(memory.read(44, AccessType::Read).unwrap(), Word::new(5));
}

#[test]
fn miss_fills_an_aligned_line() {
    let memory = Memory::new(&Config::default());
    for addr in 12..18 {
        memory.load(addr, Word::new(addr as u32)).unwrap();
    }

    assert_eq!(memory.read(14, AccessType::Fetch).unwrap(), Word::new(14));
    let lines = memory.cache_snapshot();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].tag(), 12);

    for addr in 12..18 {
        let _ = memory.read(addr, AccessType::Read).unwrap();
    }
    let stats = memory.stats();
    assert_eq!(stats.fetch_misses, 1);
    assert_eq!(stats.read_hits, 6);
    assert_eq!(stats.read_misses, 0);
}

#[test]
fn seventeenth_block_evicts() {
    let memory = Memory::new(&Config::default());
    for block in 0..17 {
        let _ = memory.read(block * 6, AccessType::Read).unwrap();
    }
    let stats = memory.stats();
    assert_eq!(stats.read_misses, 17);
    assert_eq!(stats.evictions, 1);
    assert_eq!(memory.cache_snapshot().len(), 16);
}

#[test]
fn load_refreshes_a_resident_line() {
    let memory = Memory::new(&Config::default());
    let _ = memory.read(0, AccessType::Read).unwrap();
    memory.load(2, Word::new(77)).unwrap();
    assert_eq!(memory.read(2, AccessType::Read).unwrap(), Word::new(77));
}

#[test]
fn dirty_lines_are_never_evicted() {
    let memory = Memory::new(&config_with(2, 4));
    memory.write(0, Word::new(5)).unwrap();
    let _ = memory.read(6, AccessType::Read).unwrap();
    let _ = memory.read(12, AccessType::Read).unwrap();

    let tags: Vec<usize> = memory.cache_snapshot().iter().map(|l| l.tag()).collect();
    assert!(tags.contains(&0), "dirty line kept, resident: {tags:?}");
    assert!(tags.contains(&12));
    assert_eq!(memory.read(0, AccessType::Read).unwrap(), Word::new(5));
}

#[test]
fn all_dirty_cache_reports_livelock() {
    let memory = Memory::new(&config_with(1, 4));
    memory.write(0, Word::new(1)).unwrap();
    let err = memory.read(6, AccessType::Read).unwrap_err();
    assert!(matches!(err, SimError::EvictionLivelock { attempts: 64 }));

    memory.flush();
    assert_eq!(memory.read(6, AccessType::Read).unwrap(), Word::ZERO);
}

#[test]
fn out_of_range_addresses_are_fatal() {
    let memory = Memory::new(&Config::default());
    assert_eq!(memory.size(), 2048);
    assert!(matches!(
        memory.read(2048, AccessType::Read),
        Err(SimError::AddressOutOfRange { address: 2048, limit: 2048 })
    ));
    assert!(matches!(
        memory.write(5000, Word::new(1)),
        Err(SimError::AddressOutOfRange { .. })
    ));
    assert_eq!(memory.pending_writes(), 0);
}

#[test]
fn clear_resets_everything() {
    let memory = Memory::new(&Config::default());
    memory.load(9, Word::new(3)).unwrap();
    memory.write(10, Word::new(4)).unwrap();
    memory.clear();

    assert_eq!(memory.pending_writes(), 0);
    assert!(memory.cache_snapshot().is_empty());
    assert_eq!(memory.peek_store(9).unwrap(), Word::ZERO);
    assert_eq!(memory.stats(), Default::default());
}

#[derive(Clone, Default)]
struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn cache_events_name_the_access_kind() {
    let capture = LogCapture::default();
    let sink = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let memory = Memory::new(&Config::default());
        let _ = memory.read(8, AccessType::Fetch).unwrap();
        let _ = memory.read(9, AccessType::Read).unwrap();
    });

    let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("cache miss"), "{logs}");
    assert!(logs.contains("kind=\"fetch\""), "{logs}");
    assert!(logs.contains("cache hit"), "{logs}");
    assert!(logs.contains("kind=\"read\""), "{logs}");
}
