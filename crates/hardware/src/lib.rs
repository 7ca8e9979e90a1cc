//! Functional cache simulator library.
//!
//! This crate models which blocks a hardware cache would hold for a stream of
//! memory accesses, and in what coherence state, with the following:
//! 1. **Cache:** Address decomposition, set-associative line storage, round-robin replacement.
//! 2. **Coherence:** Plain, VI and MSI per-line state machines.
//! 3. **Statistics:** Hit/miss, writeback, upgrade-miss and bus traffic figures.
//! 4. **Simulation:** Trace parsing and a multi-core driver that broadcasts misses.
//! 5. **Configuration:** Validated geometry and JSON-deserializable settings.
//!
//! Timing is not modeled.

/// Set-associative cache model (geometry, lines, replacement, protocols).
pub mod cache;
/// Common types (actions, constants, errors).
pub mod common;
/// Simulator configuration (defaults, protocol selector, cache geometry).
pub mod config;
/// Trace reader and multi-core driver.
pub mod sim;
/// Statistics accumulation and reporting.
pub mod stats;

/// Single cache instance; construct with `Cache::new`.
pub use crate::cache::{AccessOutcome, Cache};
/// Access actions.
pub use crate::common::Action;
/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, Protocol, SimConfig};
/// Multi-core driver.
pub use crate::sim::MultiCoreSystem;
