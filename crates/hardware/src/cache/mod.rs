//! Set-Associative Cache Model.
//!
//! This module implements a single-level, set-associative cache with a
//! configurable geometry. It provides:
//! 1. **Lookup:** Address decomposition and a probe of every way in the set.
//! 2. **Allocation:** Install on read misses, and on write misses when
//!    write-allocate is enabled; invalid ways are always filled first.
//! 3. **Replacement:** LRU or FIFO victim selection over per-line timestamps.
//! 4. **Statistics:** Access, hit, and miss counters plus a logical clock.

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

use std::fmt;

use tracing::{debug, trace, warn};

use self::policies::ReplacementPolicy;
use crate::common::addr::AddressLayout;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// One way of one set.
///
/// `tag` and both timestamps are only meaningful while `valid` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the slot holds a resident block.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Clock value of the most recent hit or load (LRU key).
    pub last_access_time: u64,
    /// Clock value of the load (FIFO key).
    pub load_time: u64,
}

/// Where a missing block was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Install {
    /// Way that received the block.
    pub way: usize,
    /// Tag of the block that was evicted, or `None` if the way was empty.
    pub evicted_tag: Option<u64>,
}

/// Result of a single [`Cache::access`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident in `way`.
    Hit {
        /// Way holding the block.
        way: usize,
    },
    /// The block was not resident.
    Miss {
        /// Placement of the block, or `None` for a write miss under no-write-allocate.
        installed: Option<Install>,
    },
}

impl AccessOutcome {
    /// Returns `true` for a hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Returns the lowest-numbered invalid way of a set, if any.
fn first_invalid_way(ways: &[CacheLine]) -> Option<usize> {
    ways.iter().position(|line| !line.valid)
}

/// Set-associative cache model with configurable replacement policy.
///
/// Geometry is fixed at construction. Lines are stored set-major in one
/// vector: way `w` of set `s` lives at `s * ways + w`.
pub struct Cache {
    config: CacheConfig,
    layout: AddressLayout,
    num_sets: usize,
    ways: usize,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    clock: u64,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry, replacement policy, and write-allocate flag.
    ///
    /// # Returns
    ///
    /// An empty cache (all lines invalid, clock and counters at zero).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`]; no cache is
    /// built in that case.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let ways = config.effective_ways();
        let num_sets = config.num_sets();
        let layout = AddressLayout::new(config.line_bytes, num_sets);

        debug!(
            size_bytes = config.size_bytes,
            line_bytes = config.line_bytes,
            ways,
            num_sets,
            offset_bits = layout.offset_bits(),
            index_bits = layout.index_bits(),
            tag_bits = layout.tag_bits(),
            policy = %config.policy,
            write_allocate = config.write_allocate,
            "cache constructed"
        );

        if layout.addressable_sets() < num_sets {
            warn!(
                num_sets,
                addressable_sets = layout.addressable_sets(),
                "set count is not a power of two, sets beyond the index range are never used"
            );
        }

        Ok(Self {
            config: *config,
            layout,
            num_sets,
            ways,
            lines: vec![CacheLine::default(); num_sets * ways],
            policy: policies::for_type(config.policy),
            clock: 0,
            stats: CacheStats::default(),
        })
    }

    /// Configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Tag/index/offset layout derived from the geometry.
    pub const fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// Number of ways probed per set (1 for direct-mapped).
    pub const fn effective_ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Total number of lines.
    pub const fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Current value of the logical clock.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Display name of the active replacement policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Tag portion of `addr`.
    pub const fn tag(&self, addr: u64) -> u64 {
        self.layout.tag(addr)
    }

    /// Set index of `addr`.
    pub const fn index(&self, addr: u64) -> u64 {
        self.layout.index(addr)
    }

    /// Byte offset of `addr` within its line.
    pub const fn offset(&self, addr: u64) -> u64 {
        self.layout.offset(addr)
    }

    /// Lines of one set, indexed by way, or `None` if `set` is out of range.
    pub fn set_lines(&self, set: usize) -> Option<&[CacheLine]> {
        if set >= self.num_sets {
            return None;
        }
        let base = set * self.ways;
        self.lines.get(base..base + self.ways)
    }

    /// A single line, or `None` if `set` or `way` is out of range.
    pub fn line(&self, set: usize, way: usize) -> Option<&CacheLine> {
        self.set_lines(set).and_then(|lines| lines.get(way))
    }

    /// Checks whether the block holding `addr` is resident, without side effects.
    pub fn contains(&self, addr: u64) -> bool {
        let tag = self.layout.tag(addr);
        self.set_lines(self.layout.index(addr) as usize)
            .is_some_and(|lines| lines.iter().any(|l| l.valid && l.tag == tag))
    }

    /// Snapshot of the access counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the counters and the logical clock. Resident lines are kept.
    pub fn reset_stats(&mut self) {
        debug!(accesses = self.stats.accesses, "resetting cache statistics");
        self.stats = CacheStats::default();
        self.clock = 0;
    }

    /// Marks every line invalid. Counters and clock are untouched.
    pub fn invalidate_all(&mut self) {
        for line in &mut self.lines {
            line.valid = false;
        }
    }

    /// Performs one access.
    ///
    /// Probes every way of the addressed set. On a hit the line's
    /// `last_access_time` is refreshed. On a miss the block is installed
    /// (lowest invalid way first, otherwise the policy's victim) unless this
    /// is a write and write-allocate is off. The clock advances once per call.
    ///
    /// # Arguments
    ///
    /// * `addr` - Any 64-bit byte address.
    /// * `is_write` - Whether the access is a store.
    ///
    /// # Returns
    ///
    /// What happened to the cache, see [`AccessOutcome`].
    pub fn access(&mut self, addr: u64, is_write: bool) -> AccessOutcome {
        self.stats.accesses += 1;

        let set = self.layout.index(addr) as usize;
        let tag = self.layout.tag(addr);
        let now = self.clock;
        let base = set * self.ways;

        let mut hit_way = None;
        for (way, line) in self.lines[base..base + self.ways].iter_mut().enumerate() {
            if line.valid && line.tag == tag {
                debug_assert!(hit_way.is_none(), "tag {tag:#x} resident twice in set {set}");
                line.last_access_time = now;
                hit_way = Some(way);
            }
        }

        let outcome = if let Some(way) = hit_way {
            self.stats.hits += 1;
            AccessOutcome::Hit { way }
        } else {
            self.stats.misses += 1;
            let installed = if is_write && !self.config.write_allocate {
                None
            } else {
                Some(self.install(set, tag, now))
            };
            AccessOutcome::Miss { installed }
        };

        self.clock += 1;
        outcome
    }

    /// Places `tag` into `set`, preferring an invalid way over eviction.
    fn install(&mut self, set: usize, tag: u64, now: u64) -> Install {
        let base = set * self.ways;
        let ways = &self.lines[base..base + self.ways];

        let (way, evicted_tag) = match first_invalid_way(ways) {
            Some(way) => (way, None),
            None => {
                let way = self.policy.victim(ways);
                let evicted = ways[way].tag;
                trace!(set, way, evicted_tag = evicted, new_tag = tag, "evicting line");
                (way, Some(evicted))
            }
        };

        self.lines[base + way] = CacheLine {
            valid: true,
            tag,
            last_access_time: now,
            load_time: now,
        };

        Install { way, evicted_tag }
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("config", &self.config)
            .field("num_sets", &self.num_sets)
            .field("ways", &self.ways)
            .field("policy", &self.policy.name())
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
