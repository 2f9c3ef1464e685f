//! Trace-driven cache simulator library.
//!
//! This crate models a single level of set-associative cache with the following:
//! 1. **Config:** Geometry (size, line size, ways), replacement policy, and write-allocate flag.
//! 2. **Cache:** Tag/index/offset decomposition, lookup, allocation, and LRU/FIFO replacement.
//! 3. **Simulation:** Synthetic and text trace sources and a replay driver.
//! 4. **Statistics:** Hit/miss counters, rates, and printable/serializable reports.

/// Cache model and replacement policies.
pub mod cache;
/// Common types (address layout, configuration errors).
pub mod common;
/// Simulator configuration (defaults, policy enum, validation).
pub mod config;
/// Trace sources and the replay driver.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// The cache model; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Replay driver owning one cache.
pub use crate::sim::Simulator;
