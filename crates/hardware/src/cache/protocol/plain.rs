//! Plain and VI Protocols.
//!
//! Lines are either Invalid or Valid. Local loads and stores allocate on a
//! miss; stores mark the line dirty. A plain cache ignores coherence
//! notifications. A VI cache treats any notification that hits as a loss
//! of the block: the line is written back if dirty and invalidated, since
//! VI cannot share a block between caches.
//!
//! The victim cursor steps past the selected way after every access,
//! including notifications that miss.

use super::{CoherencePolicy, Transition};
use crate::cache::line::{CacheLine, LineState};
use crate::cache::replacement::CursorMove;
use crate::common::Action;
use crate::config::Protocol;

/// Plain (`invalidate_on_snoop == false`) or VI policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlainPolicy {
    invalidate_on_snoop: bool,
}

impl PlainPolicy {
    /// Creates a plain policy, or a VI policy when `invalidate_on_snoop` is set.
    pub const fn new(invalidate_on_snoop: bool) -> Self {
        Self {
            invalidate_on_snoop,
        }
    }
}

impl CoherencePolicy for PlainPolicy {
    fn protocol(&self) -> Protocol {
        if self.invalidate_on_snoop {
            Protocol::Vi
        } else {
            Protocol::None
        }
    }

    fn on_hit(&self, line: &mut CacheLine, action: Action) -> Transition {
        if action.is_snoop() {
            let mut writeback = false;
            if self.invalidate_on_snoop {
                writeback = line.flush();
                line.state = LineState::Invalid;
            }
            return Transition::hit(writeback, CursorMove::Advance);
        }

        line.state = LineState::Valid;
        if action == Action::Store {
            line.dirty = true;
        }
        Transition::hit(false, CursorMove::Advance)
    }

    fn on_miss(&self, victim: &mut CacheLine, tag: u64, action: Action) -> Transition {
        if action.is_snoop() {
            return Transition::bypass(CursorMove::Advance);
        }
        let writeback = victim.fill(tag, LineState::Valid, action == Action::Store);
        Transition::fill(writeback)
    }
}
