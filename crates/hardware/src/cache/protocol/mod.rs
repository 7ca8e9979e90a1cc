//! Coherence Protocols.
//!
//! A protocol decides, for one access, whether it hits, whether a dirty
//! block is written back, and what state the touched line ends in. The
//! lookup loop, line storage and victim cursor are shared by all of them
//! and live in [`Cache`](super::Cache).
//!
//! # Protocols
//!
//! - `Plain`: valid/invalid lines, notifications ignored.
//! - `VI`: valid/invalid lines, notifications invalidate.
//! - `MSI`: Invalid/Shared/Modified with upgrade misses.

/// MSI protocol.
pub mod msi;

/// Plain and VI protocols.
pub mod plain;

use std::fmt;

pub use msi::MsiPolicy;
pub use plain::PlainPolicy;

use super::line::CacheLine;
use super::replacement::CursorMove;
use crate::common::Action;
use crate::config::{CacheConfig, Protocol};

/// Effect of one access on the line it touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Access is reported as a hit.
    pub hit: bool,
    /// A dirty block was written back to the next level.
    pub writeback: bool,
    /// A store found a Shared copy and had to acquire ownership.
    pub upgrade_miss: bool,
    /// A line was actually read or written (false for ignored notifications).
    pub touched: bool,
    /// How the set's victim cursor moves.
    pub cursor: CursorMove,
}

impl Transition {
    /// A hit that leaves the line untouched apart from `writeback`.
    pub const fn hit(writeback: bool, cursor: CursorMove) -> Self {
        Self {
            hit: true,
            writeback,
            upgrade_miss: false,
            touched: true,
            cursor,
        }
    }

    /// A miss that installed a block in the victim way.
    pub const fn fill(writeback: bool) -> Self {
        Self {
            hit: false,
            writeback,
            upgrade_miss: false,
            touched: true,
            cursor: CursorMove::Advance,
        }
    }

    /// A miss that did not allocate.
    pub const fn bypass(cursor: CursorMove) -> Self {
        Self {
            hit: false,
            writeback: false,
            upgrade_miss: false,
            touched: false,
            cursor,
        }
    }
}

/// State-transition rules of a coherence protocol.
///
/// Implementations only see the line selected by the shared lookup: the
/// matching line on a hit, the victim way on a miss.
pub trait CoherencePolicy: Send + Sync + fmt::Debug {
    /// Protocol this policy implements.
    fn protocol(&self) -> Protocol;

    /// Applies `action` to `line`, whose tag matched and state is valid.
    fn on_hit(&self, line: &mut CacheLine, action: Action) -> Transition;

    /// Applies `action` when no line matched; `victim` is the way named by
    /// the set's cursor and `tag` the requested block.
    fn on_miss(&self, victim: &mut CacheLine, tag: u64, action: Action) -> Transition;
}

/// Builds the policy selected by `config`.
pub fn for_config(config: &CacheConfig) -> Box<dyn CoherencePolicy> {
    match config.protocol {
        Protocol::None => Box::new(PlainPolicy::new(false)),
        Protocol::Vi => Box::new(PlainPolicy::new(true)),
        Protocol::Msi => Box::new(MsiPolicy::new(config.lru_on_invalidate)),
    }
}
