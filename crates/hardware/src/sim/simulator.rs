//! Simulator: replays an access trace against one cache.

use tracing::{debug, info};

use super::trace::{MemAccess, TraceError};
use crate::cache::Cache;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::stats::{CacheReport, CacheStats};

/// Top-level simulator: owns the cache model and feeds it accesses.
#[derive(Debug)]
pub struct Simulator {
    /// The cache under test.
    pub cache: Cache,
}

impl Simulator {
    /// Creates a simulator around a freshly built cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] if `config` is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
        })
    }

    /// Replays every access and returns the resulting counters.
    pub fn run<I>(&mut self, trace: I) -> CacheStats
    where
        I: IntoIterator<Item = MemAccess>,
    {
        for access in trace {
            let _ = self.cache.access(access.addr, access.is_write);
        }
        self.finish()
    }

    fn finish(&self) -> CacheStats {
        let stats = self.cache.stats();
        info!(
            accesses = stats.accesses,
            hits = stats.hits,
            misses = stats.misses,
            "trace replay finished"
        );
        stats
    }

    /// Replays accesses until the trace ends or yields an error.
    ///
    /// Accesses before the error have already been applied to the cache.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] produced by the trace.
    pub fn run_fallible<I>(&mut self, trace: I) -> Result<CacheStats, TraceError>
    where
        I: IntoIterator<Item = Result<MemAccess, TraceError>>,
    {
        for access in trace {
            let access = access.inspect_err(|e| {
                debug!(accesses = self.cache.stats().accesses, error = %e, "trace aborted");
            })?;
            let _ = self.cache.access(access.addr, access.is_write);
        }
        Ok(self.finish())
    }

    /// Snapshot of the cache statistics and configuration.
    pub fn report(&self) -> CacheReport {
        CacheReport::from_cache(&self.cache)
    }
}
