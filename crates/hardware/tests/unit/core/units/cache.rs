//! L1 Cache Unit Tests.
//!
//! The cache is constructed directly from `CacheConfig`; no memory subsystem
//! or CPU is needed. With the default geometry a line covers 6 words and
//! starts at a multiple of 6.

use mockall::mock;
use mockall::Sequence;
use vnsim_core::common::{SimError, Word};
use vnsim_core::config::{CacheConfig, EvictionPolicy as PolicyType};
use vnsim_core::core::units::cache::policies::{EvictionPolicy, FifoPolicy, RandomPolicy};
use vnsim_core::core::units::cache::{Cache, CacheLine};

mock! {
    pub Policy {}

    impl EvictionPolicy for Policy {
        fn update(&mut self, slot: usize);
        fn get_victim(&mut self) -> usize;
    }
}

fn line(tag: usize) -> CacheLine {
    CacheLine::new(tag, (0..6).map(|i| Word::new((tag + i) as u32)).collect())
}

fn small_config(lines: usize, policy: PolicyType) -> CacheConfig {
    CacheConfig {
        lines,
        policy,
        ..CacheConfig::default()
    }
}

#[test]
fn cold_lookup_misses() {
    let cache = Cache::new(&CacheConfig::default());
    assert_eq!(cache.read(5), None);
}

#[test]
fn line_base_is_aligned() {
    let cache = Cache::new(&CacheConfig::default());
    assert_eq!(cache.line_base(0), 0);
    assert_eq!(cache.line_base(5), 0);
    assert_eq!(cache.line_base(6), 6);
    assert_eq!(cache.line_base(20), 18);
}

#[test]
fn inserted_line_serves_all_its_words() {
    let mut cache = Cache::new(&CacheConfig::default());
    assert_eq!(cache.insert(line(12)).unwrap(), None);
    for addr in 12..18 {
        assert_eq!(cache.read(addr), Some(Word::new(addr as u32)));
    }
    assert_eq!(cache.read(11), None);
    assert_eq!(cache.read(18), None);
}

#[test]
fn write_hit_marks_only_that_word_dirty() {
    let mut cache = Cache::new(&CacheConfig::default());
    let _ = cache.insert(line(0)).unwrap();
    assert!(cache.write(3, Word::new(0o777)));
    assert_eq!(cache.read(3), Some(Word::new(0o777)));

    let held = &cache.lines()[0];
    assert!(held.is_dirty());
    assert!(held.is_word_dirty(3));
    assert!(!held.is_word_dirty(2));

    cache.clear_dirty(3);
    assert!(!cache.lines()[0].is_dirty());
}

#[test]
fn write_miss_reports_false() {
    let mut cache = Cache::new(&CacheConfig::default());
    assert!(!cache.write(40, Word::new(1)));
    assert!(cache.lines().is_empty());
}

#[test]
fn refresh_updates_without_dirtying() {
    let mut cache = Cache::new(&CacheConfig::default());
    let _ = cache.insert(line(6)).unwrap();
    cache.refresh(7, Word::new(0o55));
    assert_eq!(cache.read(7), Some(Word::new(0o55)));
    assert!(!cache.lines()[0].is_dirty());
}

#[test]
fn seventeenth_block_evicts_exactly_one_clean_line() {
    let mut cache = Cache::new(&small_config(16, PolicyType::Fifo));
    for block in 0..16 {
        assert_eq!(cache.insert(line(block * 6)).unwrap(), None);
    }
    // Dirty every line but one.
    for block in 0..15 {
        assert!(cache.write(block * 6, Word::new(1)));
    }

    let evicted = cache.insert(line(16 * 6)).unwrap().expect("one eviction");
    assert_eq!(evicted.tag(), 15 * 6);
    assert!(!evicted.is_dirty());
    assert_eq!(cache.lines().len(), 16);
    assert_eq!(cache.read(16 * 6), Some(Word::new(96)));
}

#[test]
fn dirty_victim_is_rejected_and_selection_retried() {
    let mut policy = MockPolicy::new();
    let mut seq = Sequence::new();
    policy.expect_update().returning(|_| ());
    policy
        .expect_get_victim()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(0usize);
    policy
        .expect_get_victim()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(1usize);

    let mut cache = Cache::with_policy(2, 6, 8, Box::new(policy));
    let _ = cache.insert(line(0)).unwrap();
    let _ = cache.insert(line(6)).unwrap();
    assert!(cache.write(0, Word::new(9)));

    let evicted = cache.insert(line(12)).unwrap().unwrap();
    assert_eq!(evicted.tag(), 6);
    assert_eq!(cache.read(0), Some(Word::new(9)));
}

#[test]
fn all_dirty_reports_livelock() {
    let mut cache = Cache::new(&small_config(2, PolicyType::Fifo));
    let _ = cache.insert(line(0)).unwrap();
    let _ = cache.insert(line(6)).unwrap();
    assert!(cache.write(0, Word::new(1)));
    assert!(cache.write(6, Word::new(1)));

    let err = cache.insert(line(12)).unwrap_err();
    assert!(matches!(err, SimError::EvictionLivelock { attempts: 64 }));
}

#[test]
fn clear_drops_every_line() {
    let mut cache = Cache::new(&CacheConfig::default());
    let _ = cache.insert(line(0)).unwrap();
    cache.clear();
    assert!(cache.lines().is_empty());
}

#[test]
fn fifo_policy_cycles_through_slots() {
    let mut policy = FifoPolicy::new(3);
    let picks: Vec<_> = (0..5).map(|_| policy.get_victim()).collect();
    assert_eq!(picks, vec![0, 1, 2, 0, 1]);
}

#[test]
fn random_policy_is_reproducible_and_in_range() {
    let mut a = RandomPolicy::new(16, 42);
    let mut b = RandomPolicy::new(16, 42);
    for _ in 0..100 {
        let v = a.get_victim();
        assert!(v < 16);
        assert_eq!(v, b.get_victim());
    }
}

#[test]
fn random_policy_eventually_proposes_every_slot() {
    let mut policy = RandomPolicy::new(16, 123_456_789);
    let mut seen = [false; 16];
    for _ in 0..1000 {
        seen[policy.get_victim()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
