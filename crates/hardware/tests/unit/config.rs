//! # Configuration Tests
//!
//! Defaults, JSON deserialization and validation.

use cachesim_core::common::ConfigError;
use cachesim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_cache_config_defaults() {
    let cache = CacheConfig::default();
    assert_eq!(cache.capacity, 4096);
    assert_eq!(cache.block_size, 64);
    assert_eq!(cache.associativity, 1);
    assert_eq!(cache.protocol, Protocol::None);
    assert!(!cache.lru_on_invalidate);
}

#[test]
fn test_sim_config_defaults() {
    let config = SimConfig::default();
    assert_eq!(config.cores, 1);
    assert_eq!(config.cache, CacheConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
}

#[test]
fn test_partial_cache_section() {
    let config = SimConfig::from_json(r#"{ "cache": { "associativity": 4 } }"#).unwrap();
    assert_eq!(config.cache.associativity, 4);
    assert_eq!(config.cache.capacity, 4096);
    assert_eq!(config.cache.block_size, 64);
    assert_eq!(config.cores, 1);
}

#[rstest]
#[case("none", Protocol::None)]
#[case("plain", Protocol::None)]
#[case("vi", Protocol::Vi)]
#[case("VI", Protocol::Vi)]
#[case("msi", Protocol::Msi)]
#[case("MSI", Protocol::Msi)]
fn test_protocol_json_names(#[case] name: &str, #[case] expected: Protocol) {
    let json = format!(r#"{{ "cache": {{ "protocol": "{name}" }} }}"#);
    assert_eq!(SimConfig::from_json(&json).unwrap().cache.protocol, expected);
}

#[test]
fn test_unknown_protocol_rejected() {
    assert!(SimConfig::from_json(r#"{ "cache": { "protocol": "mesi" } }"#).is_err());
}

#[test]
fn test_protocol_from_str() {
    assert_eq!("Msi".parse::<Protocol>(), Ok(Protocol::Msi));
    assert_eq!(" plain ".parse::<Protocol>(), Ok(Protocol::None));
    assert!("moesi".parse::<Protocol>().is_err());
    assert_eq!(Protocol::Vi.to_string(), "vi");
}

#[test]
fn test_builder_methods() {
    let cache = CacheConfig::new(1024, 16, 2)
        .with_protocol(Protocol::Msi)
        .with_lru_on_invalidate(true);
    assert_eq!(cache.capacity, 1024);
    assert_eq!(cache.protocol, Protocol::Msi);
    assert!(cache.lru_on_invalidate);
    assert_eq!(cache.geometry().unwrap().num_sets(), 32);
}

#[test]
fn test_zero_cores_rejected() {
    let config = SimConfig {
        cores: 0,
        ..SimConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroCores));
}

#[test]
fn test_invalid_geometry_reported_by_validate() {
    let config = SimConfig {
        cores: 2,
        cache: CacheConfig::new(4096, 48, 1),
    };
    assert_eq!(config.validate(), Err(ConfigError::BlockSizeNotPowerOfTwo(48)));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = SimConfig {
        cores: 4,
        cache: CacheConfig::new(32768, 32, 4).with_protocol(Protocol::Vi),
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""protocol":"vi""#));
    assert_eq!(SimConfig::from_json(&json).unwrap(), config);
}
