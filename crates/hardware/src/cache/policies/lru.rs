//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been hit or loaded for the
//! longest time. Recency is read from each line's `last_access_time`, which
//! the cache stamps with the logical clock on every hit and every install.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(1); the timestamps live in the cache lines
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{ReplacementPolicy, min_way_by};
use crate::cache::CacheLine;

/// LRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Returns the way with the smallest `last_access_time`.
    fn victim(&self, ways: &[CacheLine]) -> usize {
        min_way_by(ways, |line| line.last_access_time)
    }

    fn name(&self) -> &'static str {
        "LRU"
    }
}
