//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, policy
//! selection, and geometry validation.

use cachesim_core::common::ConfigError;
use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::config;

#[test]
fn test_cache_config_defaults() {
    let cache = CacheConfig::default();
    assert_eq!(cache.size_bytes, 1024 * 1024);
    assert_eq!(cache.line_bytes, 64);
    assert_eq!(cache.ways, 4);
    assert_eq!(cache.policy, ReplacementPolicy::Lru);
    assert!(cache.write_allocate);
    assert!(cache.validate().is_ok());
}

#[test]
fn test_default_derived_geometry() {
    let cache = CacheConfig::default();
    assert_eq!(cache.num_lines(), 16384);
    assert_eq!(cache.effective_ways(), 4);
    assert_eq!(cache.num_sets(), 4096);
}

#[test]
fn test_direct_mapped_sentinel() {
    let cache = config(4096, 64, 0, ReplacementPolicy::Lru, true);
    assert_eq!(cache.effective_ways(), 1);
    assert_eq!(cache.num_sets(), 64);
    assert!(cache.validate().is_ok());
}

#[test]
fn test_json_full_deserialization() {
    let json = r#"{
        "size_bytes": 8192,
        "line_bytes": 32,
        "ways": 2,
        "policy": "FIFO",
        "write_allocate": false
    }"#;
    let parsed = CacheConfig::from_json(json).unwrap();
    assert_eq!(parsed, config(8192, 32, 2, ReplacementPolicy::Fifo, false));
}

#[test]
fn test_json_missing_fields_use_defaults() {
    let parsed = CacheConfig::from_json(r#"{ "ways": 8 }"#).unwrap();
    let expected = CacheConfig {
        ways: 8,
        ..CacheConfig::default()
    };
    assert_eq!(parsed, expected);
}

#[test]
fn test_json_policy_aliases() {
    for name in ["LRU", "Lru", "lru"] {
        let json = format!(r#"{{ "policy": "{name}" }}"#);
        assert_eq!(
            CacheConfig::from_json(&json).unwrap().policy,
            ReplacementPolicy::Lru
        );
    }
    for name in ["FIFO", "Fifo", "fifo"] {
        let json = format!(r#"{{ "policy": "{name}" }}"#);
        assert_eq!(
            CacheConfig::from_json(&json).unwrap().policy,
            ReplacementPolicy::Fifo
        );
    }
}

#[test]
fn test_json_unknown_policy_rejected() {
    assert!(CacheConfig::from_json(r#"{ "policy": "Random" }"#).is_err());
}

#[test]
fn test_json_serialization_round_trip() {
    let original = config(2048, 16, 4, ReplacementPolicy::Fifo, false);
    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains("\"FIFO\""));
    assert_eq!(CacheConfig::from_json(&json).unwrap(), original);
}

// ──────────────────────────────────────────────────────────
// Replacement policy selection
// ──────────────────────────────────────────────────────────

#[test]
fn test_policy_from_code() {
    assert_eq!(ReplacementPolicy::from_code(0), Ok(ReplacementPolicy::Lru));
    assert_eq!(ReplacementPolicy::from_code(1), Ok(ReplacementPolicy::Fifo));
    assert_eq!(
        ReplacementPolicy::from_code(2),
        Err(ConfigError::InvalidReplacementPolicy("2".to_string()))
    );
}

#[test]
fn test_policy_code_round_trip() {
    for policy in [ReplacementPolicy::Lru, ReplacementPolicy::Fifo] {
        assert_eq!(ReplacementPolicy::from_code(policy.code()), Ok(policy));
    }
}

#[rstest]
#[case("0", ReplacementPolicy::Lru)]
#[case("1", ReplacementPolicy::Fifo)]
#[case("lru", ReplacementPolicy::Lru)]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case(" Fifo ", ReplacementPolicy::Fifo)]
fn test_policy_from_str(#[case] text: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(text.parse::<ReplacementPolicy>(), Ok(expected));
}

#[rstest]
#[case("2")]
#[case("plru")]
#[case("")]
fn test_policy_from_str_rejects(#[case] text: &str) {
    assert!(matches!(
        text.parse::<ReplacementPolicy>(),
        Err(ConfigError::InvalidReplacementPolicy(_))
    ));
}

#[test]
fn test_policy_display() {
    assert_eq!(ReplacementPolicy::Lru.to_string(), "LRU");
    assert_eq!(ReplacementPolicy::Fifo.to_string(), "FIFO");
}

// ──────────────────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(config(1024, 0, 1, ReplacementPolicy::Lru, true), ConfigError::InvalidLineSize(0))]
#[case(config(1024, 48, 1, ReplacementPolicy::Lru, true), ConfigError::InvalidLineSize(48))]
#[case(config(0, 64, 1, ReplacementPolicy::Lru, true), ConfigError::InvalidCacheSize { size: 0, line: 64 })]
#[case(config(1000, 64, 1, ReplacementPolicy::Lru, true), ConfigError::InvalidCacheSize { size: 1000, line: 64 })]
#[case(config(32, 64, 0, ReplacementPolicy::Lru, true), ConfigError::InvalidCacheSize { size: 32, line: 64 })]
#[case(config(256, 64, 5, ReplacementPolicy::Lru, true), ConfigError::InvalidWayCount { ways: 5, lines: 4 })]
#[case(config(512, 64, 3, ReplacementPolicy::Lru, true), ConfigError::UnevenSets { ways: 3, lines: 8 })]
fn test_validation_errors(#[case] cfg: CacheConfig, #[case] expected: ConfigError) {
    assert_eq!(cfg.validate(), Err(expected));
}

#[test]
fn test_validation_checks_line_size_first() {
    // Both the line size and the cache size are invalid; line size wins.
    let cfg = config(0, 3, 0, ReplacementPolicy::Lru, true);
    assert_eq!(cfg.validate(), Err(ConfigError::InvalidLineSize(3)));
}

#[rstest]
#[case(config(4, 1, 0, ReplacementPolicy::Lru, true))]
#[case(config(4, 1, 2, ReplacementPolicy::Fifo, true))]
#[case(config(256, 64, 4, ReplacementPolicy::Lru, false))]
#[case(config(192, 64, 3, ReplacementPolicy::Lru, true))]
#[case(config(64, 64, 1, ReplacementPolicy::Fifo, true))]
#[case(config(3072, 64, 0, ReplacementPolicy::Lru, true))]
#[case(config(384, 64, 2, ReplacementPolicy::Lru, true))]
#[case(config(384, 64, 0, ReplacementPolicy::Lru, true))]
#[case(config(768, 64, 2, ReplacementPolicy::Fifo, false))]
fn test_validation_accepts(#[case] cfg: CacheConfig) {
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn test_non_power_of_two_set_count_accepted() {
    // 3 KB direct-mapped: 48 sets.
    let cfg = config(3 * 1024, 64, 0, ReplacementPolicy::Lru, true);
    assert_eq!(cfg.num_sets(), 48);
    assert_eq!(cfg.validate(), Ok(()));
}
