//! # Configuration Error Tests
//!
//! Each message must name the violated constraint and the offending value.

use cachesim_core::common::ConfigError;

#[test]
fn invalid_line_size_message() {
    let msg = ConfigError::InvalidLineSize(48).to_string();
    assert!(msg.contains("power of 2"));
    assert!(msg.contains("48"));
}

#[test]
fn invalid_cache_size_message() {
    let msg = ConfigError::InvalidCacheSize { size: 100, line: 64 }.to_string();
    assert!(msg.contains("multiple of the line size"));
    assert!(msg.contains("100"));
    assert!(msg.contains("64"));
}

#[test]
fn invalid_way_count_message() {
    let msg = ConfigError::InvalidWayCount { ways: 9, lines: 8 }.to_string();
    assert!(msg.contains("direct-mapped"));
    assert!(msg.contains('9'));
    assert!(msg.contains('8'));
}

#[test]
fn uneven_sets_message() {
    let msg = ConfigError::UnevenSets { ways: 3, lines: 8 }.to_string();
    assert!(msg.contains("evenly divide"));
    assert!(msg.contains('3'));
}

#[test]
fn invalid_policy_message() {
    let msg = ConfigError::InvalidReplacementPolicy("7".to_string()).to_string();
    assert!(msg.contains("0 (LRU) or 1 (FIFO)"));
    assert!(msg.contains('7'));
}

#[test]
fn errors_compare_by_value() {
    assert_eq!(
        ConfigError::InvalidLineSize(0),
        ConfigError::InvalidLineSize(0)
    );
    assert_ne!(
        ConfigError::InvalidLineSize(0),
        ConfigError::InvalidCacheSize { size: 0, line: 64 }
    );
}
