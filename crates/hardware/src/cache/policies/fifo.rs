//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was loaded earliest, regardless of how
//! recently it was hit. Load order is read from each line's `load_time`,
//! which is only written when a block is installed.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(1); the timestamps live in the cache lines
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{ReplacementPolicy, min_way_by};
use crate::cache::CacheLine;

/// FIFO Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Returns the way with the smallest `load_time`.
    ///
    /// Hits never move a line in this order.
    fn victim(&self, ways: &[CacheLine]) -> usize {
        min_way_by(ways, |line| line.load_time)
    }

    fn name(&self) -> &'static str {
        "FIFO"
    }
}
