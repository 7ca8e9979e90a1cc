//! Round-Robin Victim Selection.
//!
//! Each set carries a single cursor naming the way the next fill replaces.
//! The cursor steps past every way a local access touches, which makes it a
//! cheap stand-in for LRU: the way just used is never the next victim, but
//! recency of the other ways is not tracked.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) for every operation
//! - **Space Complexity:** one counter per set
//! - **Hardware Cost:** Minimal - a `log2(ways)`-bit register per set

/// Per-set replacement cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VictimCursor {
    /// Way the next fill replaces, always `< ways`.
    next_way: usize,
    /// Associativity of the owning set.
    ways: usize,
}

impl VictimCursor {
    /// Creates a cursor for a set with `ways` ways, pointing at way 0.
    pub const fn new(ways: usize) -> Self {
        Self { next_way: 0, ways }
    }

    /// Identifies the victim way.
    #[inline]
    pub const fn victim(&self) -> usize {
        self.next_way
    }

    /// Moves the cursor to the way after `way`.
    ///
    /// Direct-mapped sets have a single way, so the cursor never moves.
    #[inline]
    pub fn advance_past(&mut self, way: usize) {
        if self.ways > 1 {
            self.next_way = (way + 1) % self.ways;
        }
    }

    /// Points the cursor at `way` so it is reused first.
    #[inline]
    pub fn reset_to(&mut self, way: usize) {
        self.next_way = way % self.ways;
    }
}

/// Cursor movement requested by a coherence policy after an access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    /// Leave the cursor where it is.
    Stay,
    /// Step past the touched way.
    Advance,
    /// Point at the touched way (it was just invalidated).
    Reset,
}

impl CursorMove {
    /// Applies this movement for an access that touched `way`.
    pub fn apply(self, cursor: &mut VictimCursor, way: usize) {
        match self {
            Self::Stay => {}
            Self::Advance => cursor.advance_past(way),
            Self::Reset => cursor.reset_to(way),
        }
    }
}
