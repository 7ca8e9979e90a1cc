//! # Error Tests
//!
//! Display text and `?` conversions into [`SimError`].

use std::io;

use cachesim_core::common::{AccessError, ConfigError, SimError, TraceError};

#[test]
fn test_config_error_display() {
    let e = ConfigError::BlockSizeNotPowerOfTwo(24);
    assert_eq!(e.to_string(), "block size 24 is not a power of two");

    let e = ConfigError::AssociativityMismatch {
        associativity: 3,
        num_lines: 8,
    };
    assert!(e.to_string().contains("associativity 3"));
}

#[test]
fn test_access_error_display() {
    assert_eq!(AccessError::InvalidAction(9).to_string(), "invalid action code 9");
}

#[test]
fn test_trace_error_reports_line() {
    let e = TraceError::Malformed {
        line: 12,
        reason: "invalid address 'zz'".to_owned(),
    };
    assert_eq!(e.to_string(), "line 12: invalid address 'zz'");
}

#[test]
fn test_unknown_core_display() {
    let e = TraceError::UnknownCore {
        record: 3,
        core: 5,
        cores: 2,
    };
    assert!(e.to_string().contains("core 5 out of range"));
}

#[test]
fn test_sim_error_from_conversions() {
    let e: SimError = ConfigError::ZeroCores.into();
    assert!(matches!(e, SimError::Config(ConfigError::ZeroCores)));
    assert!(e.to_string().starts_with("configuration error"));

    let e: SimError = AccessError::InvalidAction(7).into();
    assert!(matches!(e, SimError::Access(_)));

    let e: SimError = TraceError::from(io::Error::new(io::ErrorKind::NotFound, "gone")).into();
    assert!(matches!(e, SimError::Trace(TraceError::Io(_))));

    let e: SimError = io::Error::other("broken pipe").into();
    assert!(matches!(e, SimError::Io(_)));
}
