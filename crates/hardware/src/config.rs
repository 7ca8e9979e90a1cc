//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation. It provides:
//! 1. **Defaults:** Baseline cache geometry and core count.
//! 2. **Structures:** A root `SimConfig` holding the per-core `CacheConfig`.
//! 3. **Enums:** The coherence protocol selector.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with
//! `SimConfig::default()` and overridden field by field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::Geometry;
use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache when a field is not explicitly
/// set in a JSON configuration.
mod defaults {
    /// Default cache capacity in bytes (4 KiB).
    pub const CAPACITY: u64 = 4096;

    /// Default block size in bytes (64 bytes).
    pub const BLOCK_SIZE: u64 = 64;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: u64 = 1;

    /// Default number of simulated cores.
    pub const CORES: usize = 1;
}

/// Coherence protocol modeled by every line of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Valid/invalid lines; coherence notifications are ignored.
    #[default]
    #[serde(alias = "plain", alias = "None")]
    None,
    /// Valid/invalid lines; any notification that hits invalidates the line.
    #[serde(alias = "VI")]
    Vi,
    /// Invalid/Shared/Modified lines with upgrade misses.
    #[serde(alias = "MSI")]
    Msi,
}

impl Protocol {
    /// Lower-case name as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vi => "vi",
            Self::Msi => "msi",
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Self::None),
            "vi" => Ok(Self::Vi),
            "msi" => Ok(Self::Msi),
            other => Err(format!(
                "unknown protocol '{other}' (expected none, vi or msi)"
            )),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Geometry and policy of a single cache.
///
/// Immutable once a [`Cache`](crate::cache::Cache) is built from it. All
/// derived quantities (set count, bit widths) are computed once by
/// [`CacheConfig::geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: u64,

    /// Block (line) size in bytes; must be a power of two.
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: u64,

    /// Number of ways per set.
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: u64,

    /// Coherence protocol.
    #[serde(default)]
    pub protocol: Protocol,

    /// Point the replacement cursor at a line invalidated by a remote store,
    /// so the freed way is reused first (MSI only).
    #[serde(default)]
    pub lru_on_invalidate: bool,
}

impl CacheConfig {
    /// Returns the default capacity in bytes.
    fn default_capacity() -> u64 {
        defaults::CAPACITY
    }

    /// Returns the default block size in bytes.
    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default associativity.
    fn default_associativity() -> u64 {
        defaults::ASSOCIATIVITY
    }

    /// Builds a configuration from the three geometry parameters.
    ///
    /// Protocol defaults to [`Protocol::None`] and `lru_on_invalidate` to `false`.
    pub const fn new(capacity: u64, block_size: u64, associativity: u64) -> Self {
        Self {
            capacity,
            block_size,
            associativity,
            protocol: Protocol::None,
            lru_on_invalidate: false,
        }
    }

    /// Returns a copy with the given protocol.
    #[must_use]
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Returns a copy with `lru_on_invalidate` set.
    #[must_use]
    pub const fn with_lru_on_invalidate(mut self, enabled: bool) -> Self {
        self.lru_on_invalidate = enabled;
        self
    }

    /// Validates the geometry and derives set count and bit widths.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any size is zero, the block size or set
    /// count is not a power of two, or the sizes do not divide evenly.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.capacity, self.block_size, self.associativity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(
            defaults::CAPACITY,
            defaults::BLOCK_SIZE,
            defaults::ASSOCIATIVITY,
        )
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Protocol, SimConfig};
///
/// let json = r#"{
///     "cores": 4,
///     "cache": {
///         "capacity": 32768,
///         "block_size": 32,
///         "associativity": 4,
///         "protocol": "msi",
///         "lru_on_invalidate": true
///     }
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cores, 4);
/// assert_eq!(config.cache.protocol, Protocol::Msi);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimConfig {
    /// Number of cores, each with a private cache.
    #[serde(default = "SimConfig::default_cores")]
    pub cores: usize,

    /// Configuration shared by every core's cache.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl SimConfig {
    /// Returns the default core count.
    fn default_cores() -> usize {
        defaults::CORES
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks the core count and cache geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCores`] or any geometry error.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        if self.cores == 0 {
            return Err(ConfigError::ZeroCores);
        }
        self.cache.geometry()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cores: defaults::CORES,
            cache: CacheConfig::default(),
        }
    }
}
