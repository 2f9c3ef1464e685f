//! Cache Replacement Policies.
//!
//! Implements the victim selection algorithms for full cache sets. Both
//! policies read the per-line timestamps kept by the cache itself, so they
//! carry no state of their own.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (smallest `last_access_time`).
//! - `Fifo`: First-In, First-Out (smallest `load_time`).
//!
//! Ties are broken in favour of the lowest way index.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for selecting a victim among the ways of one set.
pub trait ReplacementPolicy: Send + Sync {
    /// Selects the way to evict from a fully-populated set.
    ///
    /// # Arguments
    ///
    /// * `ways` - The lines of one set, indexed by way. Never empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&self, ways: &[CacheLine]) -> usize;

    /// Short display name of the policy.
    fn name(&self) -> &'static str;
}

/// Builds the policy object for a configured policy type.
pub fn for_type(policy: PolicyType) -> Box<dyn ReplacementPolicy + Send + Sync> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}

/// Returns the way whose `key` is smallest, keeping the lowest index on ties.
///
/// Returns 0 for an empty slice.
pub(crate) fn min_way_by<F>(ways: &[CacheLine], key: F) -> usize
where
    F: Fn(&CacheLine) -> u64,
{
    let mut best_way = 0;
    let mut best = u64::MAX;
    for (way, line) in ways.iter().enumerate() {
        let k = key(line);
        if way == 0 || k < best {
            best = k;
            best_way = way;
        }
    }
    best_way
}
