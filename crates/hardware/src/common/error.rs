//! Configuration error definitions.
//!
//! Every failure the cache model can report happens while a configuration is
//! validated. Once a [`Cache`](crate::cache::Cache) exists, `access` has no
//! error path: any 64-bit address and write flag is a valid input.

use thiserror::Error;

/// Reasons a cache geometry or policy selection is rejected.
///
/// Each variant names the violated constraint and carries the offending
/// value(s) so the message can be shown to a user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Line size is zero or not a power of two.
    #[error("cache line size must be a positive power of 2 (got {0} bytes)")]
    InvalidLineSize(usize),

    /// Cache size is zero or not a multiple of the line size.
    #[error("cache size must be a positive multiple of the line size (got {size} bytes with {line}-byte lines)")]
    InvalidCacheSize {
        /// Requested total size in bytes.
        size: usize,
        /// Requested line size in bytes.
        line: usize,
    },

    /// Way count exceeds the number of lines in the cache.
    #[error("number of ways must be between 0 (direct-mapped) and the number of lines ({lines}), got {ways}")]
    InvalidWayCount {
        /// Requested associativity.
        ways: usize,
        /// Total line count of the cache.
        lines: usize,
    },

    /// Way count does not divide the line count into whole sets.
    #[error("number of ways ({ways}) must evenly divide the number of lines ({lines})")]
    UnevenSets {
        /// Requested associativity.
        ways: usize,
        /// Total line count of the cache.
        lines: usize,
    },

    /// Replacement policy selector is neither LRU nor FIFO.
    #[error("replacement policy must be 0 (LRU) or 1 (FIFO), got {0:?}")]
    InvalidReplacementPolicy(String),
}
