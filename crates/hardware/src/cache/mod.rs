//! Set-Associative Cache Model.
//!
//! This module implements the cache lookup/update engine. It tracks which
//! blocks are resident and in what coherence state, for a stream of accesses
//! delivered one at a time. It models:
//! 1. **Address decomposition:** tag/index/offset fields from a validated [`Geometry`].
//! 2. **Line storage:** one [`CacheSet`] per index, each owning its lines and victim cursor.
//! 3. **Replacement:** a round-robin cursor per set ([`VictimCursor`]).
//! 4. **Coherence:** a [`CoherencePolicy`] chosen at construction (Plain, VI or MSI).
//!
//! Timing is not modeled; an access either hits or misses.

/// Cache geometry and address decomposition.
pub mod geometry;

/// Line metadata and set storage.
pub mod line;

/// Coherence protocol implementations (Plain, VI, MSI).
pub mod protocol;

/// Round-robin victim cursor.
pub mod replacement;

use serde::Serialize;
use tracing::{debug, trace};

pub use self::geometry::Geometry;
pub use self::line::{CacheLine, CacheSet, LineState};
pub use self::protocol::{CoherencePolicy, MsiPolicy, PlainPolicy, Transition};
pub use self::replacement::{CursorMove, VictimCursor};

use crate::common::{AccessError, Action, ConfigError};
use crate::config::{CacheConfig, Protocol};
use crate::stats::{CacheStats, StatsSummary};

/// Everything observable about one access.
///
/// Returned by [`Cache::access`] so callers can route it to trace logging
/// or statistics without the cache depending on global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    /// Set the address mapped to.
    pub index: usize,
    /// Way that was read or written; `None` when a notification missed and
    /// no line was touched.
    pub way: Option<usize>,
    /// Access hit. An MSI upgrade miss reports `false`.
    pub hit: bool,
    /// A dirty block was written back.
    pub writeback: bool,
    /// A store had to upgrade a Shared copy.
    pub upgrade_miss: bool,
    /// Action that was applied.
    pub action: Action,
}

/// A single cache instance.
///
/// Owns its sets exclusively; every access runs to completion before the
/// next one is accepted.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    geometry: Geometry,
    sets: Vec<CacheSet>,
    policy: Box<dyn CoherencePolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache with every line Invalid, clean and tagged 0, and
    /// every victim cursor at way 0.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_geometry(config, config.geometry()?))
    }

    /// Builds a cache from a geometry already validated for `config`.
    pub(crate) fn with_geometry(config: &CacheConfig, geometry: Geometry) -> Self {
        let ways = geometry.associativity() as usize;
        let sets = (0..geometry.num_sets())
            .map(|_| CacheSet::new(ways))
            .collect();

        debug!(
            protocol = %config.protocol,
            capacity = geometry.capacity(),
            block_size = geometry.block_size(),
            ways,
            sets = geometry.num_sets(),
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            "cache constructed"
        );

        Self {
            config: *config,
            geometry,
            sets,
            policy: protocol::for_config(config),
            stats: CacheStats::default(),
        }
    }

    /// Processes one access and returns its outcome.
    ///
    /// Looks the address up in its set (first matching valid way wins), lets
    /// the coherence policy update the touched line, moves the set's victim
    /// cursor and records the event in the statistics.
    pub fn access(&mut self, addr: u64, action: Action) -> AccessOutcome {
        let tag = self.geometry.tag_of(addr);
        let index = self.geometry.index_of(addr);
        let set = &mut self.sets[index];

        let (way, transition) = match set.find(tag) {
            Some(way) => (way, self.policy.on_hit(set.line_mut(way), action)),
            None => {
                let way = set.victim();
                (way, self.policy.on_miss(set.line_mut(way), tag, action))
            }
        };
        transition.cursor.apply(set.cursor_mut(), way);

        let outcome = AccessOutcome {
            index,
            way: transition.touched.then_some(way),
            hit: transition.hit,
            writeback: transition.writeback,
            upgrade_miss: transition.upgrade_miss,
            action,
        };
        self.stats.record(&outcome);

        trace!(
            addr,
            %action,
            index,
            way = ?outcome.way,
            hit = outcome.hit,
            writeback = outcome.writeback,
            upgrade_miss = outcome.upgrade_miss,
            "access"
        );
        outcome
    }

    /// Decodes a raw action code and processes the access.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidAction`] for codes outside `0..=3`; the
    /// cache is left unchanged.
    pub fn access_code(&mut self, addr: u64, code: u32) -> Result<AccessOutcome, AccessError> {
        let action = Action::try_from(code)?;
        Ok(self.access(addr, action))
    }

    /// Returns `true` if the block holding `addr` is resident in a valid state.
    pub fn contains(&self, addr: u64) -> bool {
        let tag = self.geometry.tag_of(addr);
        self.sets[self.geometry.index_of(addr)].find(tag).is_some()
    }

    /// Configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Validated geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Coherence protocol in use.
    pub fn protocol(&self) -> Protocol {
        self.policy.protocol()
    }

    /// All sets, in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Line at (`index`, `way`), or `None` if either is out of range.
    pub fn line(&self, index: usize, way: usize) -> Option<&CacheLine> {
        self.sets.get(index)?.lines().get(way)
    }

    /// Way the next fill of set `index` will replace.
    pub fn victim_way(&self, index: usize) -> Option<usize> {
        self.sets.get(index).map(CacheSet::victim)
    }

    /// Cumulative counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Counters plus derived rates and traffic for this cache's block size.
    pub fn summary(&self) -> StatsSummary {
        self.stats.summary(self.geometry.block_size())
    }
}
