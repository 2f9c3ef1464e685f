//! Configuration for the cache simulator.
//!
//! This module defines the cache geometry and policy selection. It provides:
//! 1. **Defaults:** The baseline geometry used when a field is not given.
//! 2. **Structures:** [`CacheConfig`], deserializable from JSON.
//! 3. **Enums:** [`ReplacementPolicy`], selectable by name or numeric code.
//! 4. **Validation:** [`CacheConfig::validate`], shared with cache construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (1 MiB).
    pub const CACHE_SIZE: usize = 1024 * 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default associativity.
    pub const CACHE_WAYS: usize = 4;

    /// Write-allocate on write misses by default.
    pub const WRITE_ALLOCATE: bool = true;
}

/// Cache replacement policy algorithms.
///
/// Specifies how a victim way is chosen when a new block must be installed
/// into a set with no invalid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the way with the oldest hit or load.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out: evicts the way loaded earliest, ignoring hits.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
}

impl ReplacementPolicy {
    /// Maps the numeric selector used on the command line (0 = LRU, 1 = FIFO).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidReplacementPolicy`] for any other code.
    pub fn from_code(code: u32) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Self::Lru),
            1 => Ok(Self::Fifo),
            other => Err(ConfigError::InvalidReplacementPolicy(other.to_string())),
        }
    }

    /// Numeric selector for this policy.
    pub const fn code(self) -> u32 {
        match self {
            Self::Lru => 0,
            Self::Fifo => 1,
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    /// Accepts `0`/`1` or the policy name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return Self::from_code(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            _ => Err(ConfigError::InvalidReplacementPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => f.write_str("LRU"),
            Self::Fifo => f.write_str("FIFO"),
        }
    }
}

/// Cache geometry and policy configuration.
///
/// Immutable once a cache is built from it. `ways == 0` is the direct-mapped
/// sentinel and behaves exactly like one way.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "size_bytes": 32768,
///     "line_bytes": 64,
///     "ways": 8,
///     "policy": "FIFO",
///     "write_allocate": false
/// }"#;
///
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.num_sets(), 64);
/// assert_eq!(config.policy, ReplacementPolicy::Fifo);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size_bytes")]
    pub size_bytes: usize,
    /// Line (block) size in bytes.
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,
    /// Associativity; 0 means direct-mapped.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
    /// Victim selection when a set is full.
    #[serde(default)]
    pub policy: ReplacementPolicy,
    /// Whether a write miss installs the block.
    #[serde(default = "CacheConfig::default_write_allocate")]
    pub write_allocate: bool,
}

impl CacheConfig {
    const fn default_size_bytes() -> usize {
        defaults::CACHE_SIZE
    }

    const fn default_line_bytes() -> usize {
        defaults::CACHE_LINE
    }

    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    const fn default_write_allocate() -> bool {
        defaults::WRITE_ALLOCATE
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective associativity: the direct-mapped sentinel `0` counts as one way.
    pub const fn effective_ways(&self) -> usize {
        if self.ways == 0 { 1 } else { self.ways }
    }

    /// Total number of lines (`size_bytes / line_bytes`), 0 for a zero line size.
    pub const fn num_lines(&self) -> usize {
        if self.line_bytes == 0 {
            0
        } else {
            self.size_bytes / self.line_bytes
        }
    }

    /// Number of sets (`num_lines / effective_ways`).
    pub const fn num_sets(&self) -> usize {
        self.num_lines() / self.effective_ways()
    }

    /// Checks every geometry constraint.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, checked in this order: line
    /// size, cache size, way count, whole-set division. The set count itself
    /// need not be a power of two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_bytes == 0 || !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::InvalidLineSize(self.line_bytes));
        }
        if self.size_bytes == 0 || self.size_bytes % self.line_bytes != 0 {
            return Err(ConfigError::InvalidCacheSize {
                size: self.size_bytes,
                line: self.line_bytes,
            });
        }
        let lines = self.num_lines();
        if self.ways > lines {
            return Err(ConfigError::InvalidWayCount {
                ways: self.ways,
                lines,
            });
        }
        if lines % self.effective_ways() != 0 {
            return Err(ConfigError::UnevenSets {
                ways: self.ways,
                lines,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            write_allocate: defaults::WRITE_ALLOCATE,
        }
    }
}
