//! # Cache Lookup Tests
//!
//! Construction, the shared hit/miss path and decoding of raw action codes.

use cachesim_core::cache::{Cache, LineState};
use cachesim_core::common::{AccessError, Action, ConfigError, MAX_LINES};
use cachesim_core::config::{CacheConfig, Protocol};
use pretty_assertions::assert_eq;

use crate::common::{build, direct_mapped, two_way};

#[test]
fn test_new_cache_is_cold() {
    let cache = two_way(Protocol::Msi);
    assert_eq!(cache.sets().len(), 4);
    for set in cache.sets() {
        assert_eq!(set.lines().len(), 2);
        assert_eq!(set.victim(), 0);
        for line in set.lines() {
            assert_eq!(line.state, LineState::Invalid);
            assert!(!line.dirty);
            assert_eq!(line.tag, 0);
        }
    }
    assert_eq!(cache.stats().cpu_accesses, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let err = Cache::new(&CacheConfig::new(16, 3, 1)).unwrap_err();
    assert_eq!(err, ConfigError::BlockSizeNotPowerOfTwo(3));
}

/// A geometry too large to allocate is a configuration error, not a panic.
#[test]
fn test_oversized_cache_rejected() {
    let err = Cache::new(&CacheConfig::new(1 << 63, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::TooManyLines {
            num_lines: 1 << 63,
            max: MAX_LINES,
        }
    );
}

#[test]
fn test_protocol_selected_from_config() {
    assert_eq!(direct_mapped(Protocol::None).protocol(), Protocol::None);
    assert_eq!(direct_mapped(Protocol::Vi).protocol(), Protocol::Vi);
    assert_eq!(direct_mapped(Protocol::Msi).protocol(), Protocol::Msi);
}

/// Address zero must miss on a cold cache even though every line is
/// tagged zero.
#[test]
fn test_cold_tag_zero_misses() {
    let mut cache = direct_mapped(Protocol::None);
    assert!(!cache.contains(0));
    let out = cache.access(0, Action::Load);
    assert!(!out.hit);
    assert!(!out.writeback);
}

#[test]
fn test_outcome_reports_index_and_way() {
    let mut cache = two_way(Protocol::None);
    let out = cache.access(0x2c, Action::Load);
    assert_eq!(out.index, 3);
    assert_eq!(out.way, Some(0));
    assert_eq!(out.action, Action::Load);

    let out = cache.access(0x1c, Action::Load);
    assert_eq!(out.index, 3);
    assert_eq!(out.way, Some(1));
}

#[test]
fn test_same_block_different_offset_hits() {
    let mut cache = build(CacheConfig::new(4096, 64, 4));
    let _ = cache.access(0x1000, Action::Load);
    assert!(cache.access(0x103f, Action::Load).hit);
    assert!(!cache.access(0x1040, Action::Load).hit);
}

#[test]
fn test_access_code_decodes_action() {
    let mut cache = direct_mapped(Protocol::None);
    let out = cache.access_code(0, 1).unwrap();
    assert_eq!(out.action, Action::Store);
    assert_eq!(cache.stats().stores, 1);
}

#[test]
fn test_invalid_code_leaves_cache_unchanged() {
    let mut cache = two_way(Protocol::Msi);
    let _ = cache.access(0, Action::Store);
    let sets_before = cache.sets().to_vec();
    let stats_before = *cache.stats();

    assert_eq!(cache.access_code(0, 7), Err(AccessError::InvalidAction(7)));

    assert_eq!(*cache.stats(), stats_before);
    for (before, after) in sets_before.iter().zip(cache.sets()) {
        assert_eq!(before.lines(), after.lines());
        assert_eq!(before.victim(), after.victim());
    }
}

#[test]
fn test_line_accessor_bounds() {
    let cache = two_way(Protocol::None);
    assert!(cache.line(3, 1).is_some());
    assert!(cache.line(3, 2).is_none());
    assert!(cache.line(4, 0).is_none());
}

#[test]
fn test_summary_uses_block_size() {
    let mut cache = build(CacheConfig::new(1024, 32, 2));
    let _ = cache.access(0, Action::Load);
    assert_eq!(cache.summary().bytes_bus_to_cache, 32);
}
