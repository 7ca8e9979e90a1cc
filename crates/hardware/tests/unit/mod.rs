//! # Unit Components
//!
//! Tests for each building block of the simulator: shared types, the cache
//! engine and its protocols, configuration, statistics and the trace driver.



/// Configuration defaults, JSON parsing and validation.
pub mod config;
