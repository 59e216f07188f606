//! Configuration Tests.

use std::io::Write;

use vnsim_core::common::SimError;
use vnsim_core::config::{Config, EvictionPolicy};

#[test]
fn defaults_describe_the_reference_machine() {
    let config = Config::default();
    assert_eq!(config.general.boot_address, 0o10);
    assert!(!config.general.trace_micro_steps);
    assert_eq!(config.memory.words, 2048);
    assert_eq!(config.memory.write_buffer_capacity, 4);
    assert_eq!(config.cache.lines, 16);
    assert_eq!(config.cache.words_per_line, 6);
    assert_eq!(config.cache.policy, EvictionPolicy::Random);
    assert_eq!(config.cache.max_eviction_attempts, 64);
}

#[test]
fn empty_document_takes_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.memory.words, 2048);
    assert_eq!(config.cache.lines, 16);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config =
        Config::from_json(r#"{ "cache": { "policy": "FIFO", "lines": 4 } }"#).unwrap();
    assert_eq!(config.cache.policy, EvictionPolicy::Fifo);
    assert_eq!(config.cache.lines, 4);
    assert_eq!(config.cache.words_per_line, 6);
    assert_eq!(config.general.boot_address, 0o10);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_json("{ \"memory\": ").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "general": {{ "boot_address": 64 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.boot_address, 64);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
