//! # Victim Cursor Tests
//!
//! The per-set round-robin cursor, directly and through a cache.

use cachesim_core::cache::{CursorMove, VictimCursor};
use cachesim_core::common::Action::{Load, Store};
use cachesim_core::config::Protocol;

use crate::common::{run, two_way};

#[test]
fn test_cursor_starts_at_way_zero() {
    assert_eq!(VictimCursor::new(4).victim(), 0);
}

#[test]
fn test_advance_wraps() {
    let mut cursor = VictimCursor::new(4);
    cursor.advance_past(2);
    assert_eq!(cursor.victim(), 3);
    cursor.advance_past(3);
    assert_eq!(cursor.victim(), 0);
}

#[test]
fn test_direct_mapped_cursor_never_moves() {
    let mut cursor = VictimCursor::new(1);
    cursor.advance_past(0);
    assert_eq!(cursor.victim(), 0);
}

#[test]
fn test_cursor_moves() {
    let mut cursor = VictimCursor::new(4);
    CursorMove::Advance.apply(&mut cursor, 1);
    assert_eq!(cursor.victim(), 2);
    CursorMove::Stay.apply(&mut cursor, 0);
    assert_eq!(cursor.victim(), 2);
    CursorMove::Reset.apply(&mut cursor, 0);
    assert_eq!(cursor.victim(), 0);
}

/// Fills walk the ways in order.
#[test]
fn test_fills_rotate_through_ways() {
    let mut cache = two_way(Protocol::None);
    let out = run(&mut cache, &[(Load, 0), (Load, 16), (Load, 32)]);
    let ways: Vec<_> = out.iter().map(|o| o.way).collect();
    assert_eq!(ways, vec![Some(0), Some(1), Some(0)]);
    assert!(!cache.contains(0), "third fill replaces way 0");
    assert!(cache.contains(16));
}

/// A hit moves the cursor past the hit way, so the block just used survives
/// the next fill.
#[test]
fn test_hit_protects_most_recent_way() {
    let mut cache = two_way(Protocol::None);
    let _ = run(&mut cache, &[(Load, 0), (Load, 16), (Store, 0), (Load, 32)]);
    assert!(cache.contains(0));
    assert!(!cache.contains(16));
    assert!(cache.contains(32));
}

#[test]
fn test_sets_have_independent_cursors() {
    let mut cache = two_way(Protocol::None);
    let _ = run(&mut cache, &[(Load, 0), (Load, 4)]);
    assert_eq!(cache.victim_way(0), Some(1));
    assert_eq!(cache.victim_way(1), Some(1));
    assert_eq!(cache.victim_way(2), Some(0));
    assert_eq!(cache.victim_way(4), None);
}
