//! # Simulator Tests
//!
//! Replay of infallible and fallible traces, and the report snapshot.

use std::io::Cursor;

use cachesim_core::Simulator;
use cachesim_core::common::ConfigError;
use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::sim::{MemAccess, SyntheticTrace, TextTrace, TraceError};
use cachesim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

use crate::common::harness::{config, init_tracing};

fn small_sim() -> Simulator {
    init_tracing();
    Simulator::new(&config(256, 64, 2, ReplacementPolicy::Lru, true)).unwrap()
}

#[test]
fn new_rejects_invalid_config() {
    let err = Simulator::new(&config(1000, 64, 1, ReplacementPolicy::Lru, true)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidCacheSize { size: 1000, line: 64 });
}

#[test]
fn run_returns_final_counters() {
    let mut sim = small_sim();
    let stats = sim.run([
        MemAccess::read(0x000),
        MemAccess::read(0x010),
        MemAccess::write(0x020),
        MemAccess::read(0x040),
    ]);
    assert_eq!(
        stats,
        CacheStats {
            accesses: 4,
            hits: 2,
            misses: 2
        }
    );
    assert_eq!(sim.cache.stats(), stats);
}

#[test]
fn run_accumulates_across_calls() {
    let mut sim = small_sim();
    let _ = sim.run([MemAccess::read(0x0)]);
    let stats = sim.run([MemAccess::read(0x0)]);
    assert_eq!(stats.accesses, 2);
    assert_eq!(stats.hits, 1);
}

#[test]
fn run_empty_trace() {
    let mut sim = small_sim();
    assert_eq!(sim.run(std::iter::empty()), CacheStats::default());
}

#[test]
fn run_synthetic_consumes_every_access() {
    init_tracing();
    let cfg = CacheConfig::default();
    let mut sim = Simulator::new(&cfg).unwrap();
    let trace = SyntheticTrace::new(cfg.size_bytes as u64, cfg.line_bytes as u64, 5_000, 42);
    let stats = sim.run(trace);
    assert_eq!(stats.accesses, 5_000);
    assert_eq!(stats.hits + stats.misses, 5_000);
    assert!(stats.misses > 0);
}

#[test]
fn run_synthetic_is_reproducible() {
    init_tracing();
    let cfg = config(4096, 64, 2, ReplacementPolicy::Fifo, false);
    let replay = || {
        let mut sim = Simulator::new(&cfg).unwrap();
        sim.run(SyntheticTrace::new(8192, 64, 2_000, 7))
    };
    assert_eq!(replay(), replay());
}

#[test]
fn run_fallible_replays_text_trace() {
    let mut sim = small_sim();
    let text = "R 0x0\nW 0x8\n# comment\n\nR 64\n";
    let stats = sim.run_fallible(TextTrace::new(Cursor::new(text))).unwrap();
    assert_eq!(stats.accesses, 3);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

#[test]
fn run_fallible_stops_at_first_error() {
    let mut sim = small_sim();
    let text = "R 0x0\nR 0x40\nX 0x80\nR 0xc0\n";
    let err = sim
        .run_fallible(TextTrace::new(Cursor::new(text)))
        .unwrap_err();

    assert!(matches!(err, TraceError::Parse { line: 3, .. }));
    // The two accesses before the bad line were applied; the one after was not.
    assert_eq!(sim.cache.stats().accesses, 2);
    assert!(sim.cache.contains(0x40));
    assert!(!sim.cache.contains(0xc0));
}

#[test]
fn report_reflects_cache_state() {
    let mut sim = small_sim();
    let _ = sim.run([MemAccess::read(0x0), MemAccess::read(0x0), MemAccess::read(0x0), MemAccess::read(0x40)]);
    let report = sim.report();
    assert_eq!(report.config, *sim.cache.config());
    assert_eq!(report.stats.accesses, 4);
    assert!((report.hit_rate - 50.0).abs() < 1e-9);
    assert!((report.miss_rate - 50.0).abs() < 1e-9);
}
