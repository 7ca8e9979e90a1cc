//! MSI Protocol.
//!
//! | State    | LOAD       | STORE                    | LD_MISS           | ST_MISS           |
//! |----------|------------|--------------------------|-------------------|-------------------|
//! | miss     | fill S     | fill M                   | ignored           | ignored           |
//! | Shared   | S, hit     | M, upgrade miss          | S, hit            | I, hit            |
//! | Modified | M, hit     | M, hit                   | S, hit, writeback | I, hit, writeback |
//!
//! Fills write back a dirty victim. An upgrade miss is reported as a miss
//! even though the tag matched. Modified lines are always dirty; Shared and
//! Invalid lines are always clean.

use super::{CoherencePolicy, Transition};
use crate::cache::line::{CacheLine, LineState};
use crate::cache::replacement::CursorMove;
use crate::common::Action;
use crate::config::Protocol;

/// MSI policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MsiPolicy {
    lru_on_invalidate: bool,
}

impl MsiPolicy {
    /// Creates an MSI policy.
    ///
    /// With `lru_on_invalidate`, a line invalidated by a remote store becomes
    /// the set's next victim.
    pub const fn new(lru_on_invalidate: bool) -> Self {
        Self { lru_on_invalidate }
    }
}

impl CoherencePolicy for MsiPolicy {
    fn protocol(&self) -> Protocol {
        Protocol::Msi
    }

    fn on_hit(&self, line: &mut CacheLine, action: Action) -> Transition {
        match action {
            Action::Load => Transition::hit(false, CursorMove::Advance),
            Action::Store => {
                let upgrade = line.state == LineState::Shared;
                line.state = LineState::Modified;
                line.dirty = true;
                Transition {
                    hit: !upgrade,
                    upgrade_miss: upgrade,
                    ..Transition::hit(false, CursorMove::Advance)
                }
            }
            Action::LdMiss => {
                let mut writeback = false;
                if line.state == LineState::Modified {
                    writeback = line.flush();
                    line.state = LineState::Shared;
                }
                Transition::hit(writeback, CursorMove::Stay)
            }
            Action::StMiss => {
                let writeback = line.flush();
                line.state = LineState::Invalid;
                let cursor = if self.lru_on_invalidate {
                    CursorMove::Reset
                } else {
                    CursorMove::Stay
                };
                Transition::hit(writeback, cursor)
            }
        }
    }

    fn on_miss(&self, victim: &mut CacheLine, tag: u64, action: Action) -> Transition {
        let writeback = match action {
            Action::Load => victim.fill(tag, LineState::Shared, false),
            Action::Store => victim.fill(tag, LineState::Modified, true),
            Action::LdMiss | Action::StMiss => return Transition::bypass(CursorMove::Stay),
        };
        Transition::fill(writeback)
    }
}
