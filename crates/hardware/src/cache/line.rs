//! Cache line and set storage.

use super::replacement::VictimCursor;

/// Coherence state of a single line.
///
/// Plain and VI caches use `Invalid`/`Valid`; MSI caches use
/// `Invalid`/`Shared`/`Modified`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineState {
    /// No data; the tag is meaningless.
    #[default]
    Invalid,
    /// Holds data (Plain/VI).
    Valid,
    /// Read-only copy that other caches may also hold (MSI).
    Shared,
    /// Exclusive, written copy (MSI).
    Modified,
}

impl LineState {
    /// Returns `true` for every state except `Invalid`.
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Metadata for one line: tag, dirty flag and coherence state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident block; only meaningful when `state` is valid.
    pub tag: u64,
    /// Line holds data not yet written back.
    pub dirty: bool,
    /// Coherence state.
    pub state: LineState,
}

impl CacheLine {
    /// Returns `true` if this line holds the block with `tag`.
    #[inline]
    pub const fn matches(&self, tag: u64) -> bool {
        self.state.is_valid() && self.tag == tag
    }

    /// Replaces the line with a new block, returning whether the old
    /// contents had to be written back.
    pub(crate) fn fill(&mut self, tag: u64, state: LineState, dirty: bool) -> bool {
        let writeback = self.flush();
        *self = Self { tag, dirty, state };
        writeback
    }

    /// Clears the dirty flag, returning whether it was set on a valid line.
    pub(crate) fn flush(&mut self) -> bool {
        let writeback = self.dirty && self.state.is_valid();
        self.dirty = false;
        writeback
    }
}

/// One set: `associativity` lines sharing an index, plus its victim cursor.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
    cursor: VictimCursor,
}

impl CacheSet {
    /// Creates a set of `ways` invalid, clean lines with the cursor at way 0.
    pub(crate) fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways].into_boxed_slice(),
            cursor: VictimCursor::new(ways),
        }
    }

    /// Returns the first way holding `tag`, scanning from way 0.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    /// Lines in way order.
    #[inline]
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Way the next fill will replace.
    #[inline]
    pub const fn victim(&self) -> usize {
        self.cursor.victim()
    }

    #[inline]
    pub(crate) fn line_mut(&mut self, way: usize) -> &mut CacheLine {
        &mut self.lines[way]
    }

    #[inline]
    pub(crate) fn cursor_mut(&mut self) -> &mut VictimCursor {
        &mut self.cursor
    }
}
