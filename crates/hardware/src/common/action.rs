//! Cache Access Actions.
//!
//! This module defines the classification of events a cache observes:
//! 1. **Local Requests:** Loads and stores issued by the core that owns the cache.
//! 2. **Coherence Notifications:** Misses by another agent that this cache must snoop.
//! 3. **Wire Codes:** The numeric encoding used by trace files (0..=3).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::AccessError;

/// Kind of event delivered to a cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Read by the local core.
    Load,

    /// Write by the local core.
    Store,

    /// Another agent missed on a read of this block.
    ///
    /// Under MSI this downgrades a Modified copy to Shared.
    LdMiss,

    /// Another agent missed on (or upgraded for) a write of this block.
    ///
    /// Under VI and MSI this invalidates the local copy.
    StMiss,
}

impl Action {
    /// All actions in wire-code order.
    pub const ALL: [Self; 4] = [Self::Load, Self::Store, Self::LdMiss, Self::StMiss];

    /// Returns the numeric trace encoding of this action.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Load => 0,
            Self::Store => 1,
            Self::LdMiss => 2,
            Self::StMiss => 3,
        }
    }

    /// Returns `true` for requests issued by the local core.
    #[inline]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Load | Self::Store)
    }

    /// Returns `true` for coherence notifications from another agent.
    #[inline]
    pub const fn is_snoop(self) -> bool {
        !self.is_local()
    }

    /// Returns `true` for actions that write the block.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Store | Self::StMiss)
    }

    /// Notification other caches observe when this local request misses.
    ///
    /// Returns `None` for actions that are already notifications.
    pub const fn snoop(self) -> Option<Self> {
        match self {
            Self::Load => Some(Self::LdMiss),
            Self::Store => Some(Self::StMiss),
            Self::LdMiss | Self::StMiss => None,
        }
    }

    /// Canonical upper-case name, as used in traces and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::LdMiss => "LD_MISS",
            Self::StMiss => "ST_MISS",
        }
    }
}

impl TryFrom<u32> for Action {
    type Error = AccessError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Load),
            1 => Ok(Self::Store),
            2 => Ok(Self::LdMiss),
            3 => Ok(Self::StMiss),
            other => Err(AccessError::InvalidAction(other)),
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = AccessError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::try_from(u32::from(code))
    }
}

impl FromStr for Action {
    type Err = AccessError;

    /// Parses either a wire code (`0`..=`3`) or a name such as `ld_miss`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u32>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AccessError::UnknownAction(s.to_owned()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
