//! Configuration system for the simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (memory size, boot address, cache geometry).
//! 2. **Structures:** Hierarchical config for general, memory and cache settings.
//! 3. **Enums:** Cache eviction policy selection.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or use `Config::default()`.

use serde::Deserialize;

use crate::common::error::Result;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Address the PC is set to on IPL (octal 10).
    pub const BOOT_ADDRESS: u32 = constants::DEFAULT_BOOT_ADDRESS;

    /// Main memory size in words.
    pub const MEMORY_WORDS: usize = constants::DEFAULT_MEMORY_WORDS;

    /// Write buffer depth.
    pub const WRITE_BUFFER_CAPACITY: usize = constants::WRITE_BUFFER_CAPACITY;

    /// Number of cache line slots.
    pub const CACHE_LINES: usize = constants::CACHE_LINES;

    /// Words per cache line.
    pub const CACHE_LINE_WORDS: usize = constants::CACHE_LINE_WORDS;

    /// Victim selection retries before eviction is reported as livelocked.
    pub const MAX_EVICTION_ATTEMPTS: usize = constants::MAX_EVICTION_ATTEMPTS;

    /// Seed of the random eviction generator.
    pub const EVICTION_SEED: u64 = 123_456_789;
}

/// Cache eviction policy algorithms.
///
/// Whatever the policy proposes, dirty lines are never evicted; the cache
/// retries selection until a clean line is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EvictionPolicy {
    /// Uniformly random slot.
    #[default]
    Random,
    /// Round-robin over the slots.
    #[serde(alias = "FIFO")]
    Fifo,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use vnsim_core::config::{Config, EvictionPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.general.boot_address, 0o10);
/// assert_eq!(config.cache.lines, 16);
///
/// let json = r#"{
///     "general": { "boot_address": 100, "trace_micro_steps": true },
///     "memory": { "words": 4096 },
///     "cache": { "policy": "Fifo" }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.boot_address, 100);
/// assert_eq!(config.memory.words, 4096);
/// assert_eq!(config.memory.write_buffer_capacity, 4);
/// assert_eq!(config.cache.policy, EvictionPolicy::Fifo);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Main memory and write buffer settings.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// L1 cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`](crate::common::SimError::Config) for malformed JSON
    /// or a field of the wrong type.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`](crate::common::SimError::Io) when the file cannot be
    /// read, otherwise as [`from_json`](Self::from_json).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// PC value after IPL.
    #[serde(default = "GeneralConfig::default_boot_address")]
    pub boot_address: u32,

    /// Emit a `trace` event with the disassembled instruction on every micro-step.
    #[serde(default)]
    pub trace_micro_steps: bool,
}

impl GeneralConfig {
    const fn default_boot_address() -> u32 {
        defaults::BOOT_ADDRESS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            boot_address: defaults::BOOT_ADDRESS,
            trace_micro_steps: false,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of words in the store. Addresses at or beyond this are fatal.
    #[serde(default = "MemoryConfig::default_words")]
    pub words: usize,

    /// Write buffer depth; the engine blocks when this many entries are pending.
    #[serde(default = "MemoryConfig::default_write_buffer_capacity")]
    pub write_buffer_capacity: usize,
}

impl MemoryConfig {
    const fn default_words() -> usize {
        defaults::MEMORY_WORDS
    }

    const fn default_write_buffer_capacity() -> usize {
        defaults::WRITE_BUFFER_CAPACITY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            words: defaults::MEMORY_WORDS,
            write_buffer_capacity: defaults::WRITE_BUFFER_CAPACITY,
        }
    }
}

/// L1 cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Number of line slots.
    #[serde(default = "CacheConfig::default_lines")]
    pub lines: usize,

    /// Words per line. Line tags are aligned to this size.
    #[serde(default = "CacheConfig::default_words_per_line")]
    pub words_per_line: usize,

    /// Victim selection policy.
    #[serde(default)]
    pub policy: EvictionPolicy,

    /// Victim selections tried before eviction fails with a livelock error.
    #[serde(default = "CacheConfig::default_max_eviction_attempts")]
    pub max_eviction_attempts: usize,

    /// Seed for the random policy.
    #[serde(default = "CacheConfig::default_seed")]
    pub seed: u64,
}

impl CacheConfig {
    const fn default_lines() -> usize {
        defaults::CACHE_LINES
    }

    const fn default_words_per_line() -> usize {
        defaults::CACHE_LINE_WORDS
    }

    const fn default_max_eviction_attempts() -> usize {
        defaults::MAX_EVICTION_ATTEMPTS
    }

    const fn default_seed() -> u64 {
        defaults::EVICTION_SEED
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lines: defaults::CACHE_LINES,
            words_per_line: defaults::CACHE_LINE_WORDS,
            policy: EvictionPolicy::default(),
            max_eviction_attempts: defaults::MAX_EVICTION_ATTEMPTS,
            seed: defaults::EVICTION_SEED,
        }
    }
}

