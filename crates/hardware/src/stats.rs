//! Cache statistics collection and reporting.
//!
//! This module tracks and reports the outcome of a simulation run. It provides:
//! 1. **Counters:** Accesses, hits, and misses owned by the cache model.
//! 2. **Derived metrics:** Hit and miss rates as percentages.
//! 3. **Reports:** A printable summary, a tab-separated stats file, and a
//!    JSON-serializable snapshot that echoes the configuration.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::cache::Cache;
use crate::common::addr::AddressLayout;
use crate::config::CacheConfig;

/// Access counters for one cache.
///
/// `accesses == hits + misses` holds after every access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total accesses performed.
    pub accesses: u64,
    /// Accesses that found the block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate in percent, 0.0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.hits as f64 / self.accesses as f64) * 100.0
        }
    }

    /// Miss rate in percent, 0.0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.misses as f64 / self.accesses as f64) * 100.0
        }
    }
}

/// Statistics snapshot together with the configuration that produced it.
#[derive(Clone, Debug, Serialize)]
pub struct CacheReport {
    /// Geometry and policies of the simulated cache.
    pub config: CacheConfig,
    /// Derived address layout.
    pub layout: AddressLayout,
    /// Counters at the time of the snapshot.
    pub stats: CacheStats,
    /// Hit rate in percent.
    pub hit_rate: f64,
    /// Miss rate in percent.
    pub miss_rate: f64,
}

impl CacheReport {
    /// Takes a snapshot of `cache`.
    pub fn from_cache(cache: &Cache) -> Self {
        let stats = cache.stats();
        Self {
            config: *cache.config(),
            layout: *cache.layout(),
            stats,
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the tab-separated stats file format.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let c = &self.config;
        writeln!(out, "Cache Size (KB) \t\t{}", c.size_bytes / 1024)?;
        writeln!(out, "Line Size (bytes) \t\t{}", c.line_bytes)?;
        writeln!(out, "Number of Ways \t\t\t{}", c.effective_ways())?;
        writeln!(out, "Replacement Policy \t\t{}", c.policy)?;
        writeln!(out, "Write Allocate Policy \t\t{}", write_policy_name(c.write_allocate))?;
        writeln!(out, "Offset bits: \t\t\t{}", self.layout.offset_bits())?;
        writeln!(out, "Index bits: \t\t\t{}", self.layout.index_bits())?;
        writeln!(out, "Tag bits: \t\t\t{}", self.layout.tag_bits())?;
        writeln!(out, "Total Accesses: \t\t{}", self.stats.accesses)?;
        writeln!(out, "Total Hits: \t\t\t{}", self.stats.hits)?;
        writeln!(out, "Total Misses: \t\t\t{}", self.stats.misses)?;
        writeln!(out, "Hit Rate: \t\t\t{:.2}%", self.hit_rate)?;
        writeln!(out, "Miss Rate: \t\t\t{:.2}%", self.miss_rate)?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the stats file into it.
    ///
    /// # Errors
    ///
    /// Returns any error from creating or writing the file.
    pub fn write_stats_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_stats(&mut out)?;
        out.flush()
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

const fn write_policy_name(write_allocate: bool) -> &'static str {
    if write_allocate {
        "Write Allocate"
    } else {
        "No Write Allocate"
    }
}

impl fmt::Display for CacheReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(f, "------------------------------------------")?;
        writeln!(f, "Cache Statistics:")?;
        writeln!(f, "------------------------------------------")?;
        writeln!(f, "  Cache Size:           {} KB", c.size_bytes / 1024)?;
        writeln!(f, "  Line Size:            {} bytes", c.line_bytes)?;
        writeln!(f, "  Number of Ways:       {}", c.effective_ways())?;
        writeln!(f, "  Replacement Policy:   {}", c.policy)?;
        writeln!(f, "  Write Allocate:       {}", if c.write_allocate { "Yes" } else { "No" })?;
        writeln!(f, "  Total Accesses:       {}", self.stats.accesses)?;
        writeln!(f, "  Total Hits:           {}", self.stats.hits)?;
        writeln!(f, "  Total Misses:         {}", self.stats.misses)?;
        writeln!(f, "  Hit Rate:             {:.2}%", self.hit_rate)?;
        writeln!(f, "  Miss Rate:            {:.2}%", self.miss_rate)?;
        writeln!(f, "------------------------------------------")
    }
}
