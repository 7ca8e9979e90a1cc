//! # Geometry Tests
//!
//! Bit-field widths, address decomposition and the configuration checks
//! performed before any cache is built.

use cachesim_core::cache::Geometry;
use cachesim_core::common::{ADDRESS_WIDTH, ConfigError, MAX_LINES};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_direct_mapped_widths() {
    let g = Geometry::new(16, 4, 1).unwrap();
    assert_eq!(g.num_lines(), 4);
    assert_eq!(g.num_sets(), 4);
    assert_eq!(g.offset_bits(), 2);
    assert_eq!(g.index_bits(), 2);
    assert_eq!(g.tag_bits(), ADDRESS_WIDTH - 4);
}

#[test]
fn test_set_associative_widths() {
    // 32 KiB, 32-byte blocks, 4 ways: 1024 lines, 256 sets.
    let g = Geometry::new(32 * 1024, 32, 4).unwrap();
    assert_eq!(g.num_lines(), 1024);
    assert_eq!(g.num_sets(), 256);
    assert_eq!(g.offset_bits(), 5);
    assert_eq!(g.index_bits(), 8);
    assert_eq!(g.tag_bits(), 51);
}

#[test]
fn test_fully_associative_has_no_index_bits() {
    let g = Geometry::new(256, 16, 16).unwrap();
    assert_eq!(g.num_sets(), 1);
    assert_eq!(g.index_bits(), 0);
    assert_eq!(g.index_of(u64::MAX), 0);
    assert_eq!(g.tag_of(0x1230), 0x123);
}

#[test]
fn test_field_extraction() {
    let g = Geometry::new(16, 4, 1).unwrap();
    assert_eq!(g.tag_of(16), 1);
    assert_eq!(g.index_of(16), 0);
    assert_eq!(g.index_of(0b1110), 0b11);
    assert_eq!(g.offset_of(0b1110), 0b10);
    assert_eq!(g.block_address_of(0b1110), 0b1100);
}

#[test]
fn test_offset_does_not_affect_tag_or_index() {
    let g = Geometry::new(4096, 64, 2).unwrap();
    let base = 0xdead_b000;
    for offset in 0..64 {
        assert_eq!(g.tag_of(base + offset), g.tag_of(base));
        assert_eq!(g.index_of(base + offset), g.index_of(base));
        assert_eq!(g.block_address_of(base + offset), base);
    }
}

#[test]
fn test_high_address_bits_land_in_tag() {
    let g = Geometry::new(4096, 64, 1).unwrap();
    assert_eq!(g.tag_of(u64::MAX), (1u64 << g.tag_bits()) - 1);
    assert_eq!(g.tag_of(1 << 63), 1 << (g.tag_bits() - 1));
}

#[rstest]
#[case(0, 4, 1, ConfigError::ZeroCapacity)]
#[case(16, 0, 1, ConfigError::ZeroBlockSize)]
#[case(16, 4, 0, ConfigError::ZeroAssociativity)]
#[case(48, 12, 1, ConfigError::BlockSizeNotPowerOfTwo(12))]
#[case(18, 4, 1, ConfigError::CapacityNotDivisible { capacity: 18, block_size: 4 })]
#[case(32, 4, 3, ConfigError::AssociativityMismatch { associativity: 3, num_lines: 8 })]
#[case(24, 4, 2, ConfigError::SetCountNotPowerOfTwo(3))]
fn test_invalid_geometry_rejected(
    #[case] capacity: u64,
    #[case] block_size: u64,
    #[case] associativity: u64,
    #[case] expected: ConfigError,
) {
    assert_eq!(Geometry::new(capacity, block_size, associativity), Err(expected));
}

#[test]
fn test_line_count_limit() {
    let g = Geometry::new(MAX_LINES, 1, 1).unwrap();
    assert_eq!(g.num_lines(), MAX_LINES);

    assert_eq!(
        Geometry::new(MAX_LINES * 2, 1, 1),
        Err(ConfigError::TooManyLines {
            num_lines: MAX_LINES * 2,
            max: MAX_LINES,
        })
    );
    assert_eq!(
        Geometry::new(1 << 63, 1, 1),
        Err(ConfigError::TooManyLines {
            num_lines: 1 << 63,
            max: MAX_LINES,
        })
    );
}

#[test]
fn test_largest_geometry_keeps_one_tag_bit() {
    let g = Geometry::new(1 << 63, 1 << 62, 1).unwrap();
    assert_eq!(g.offset_bits(), 62);
    assert_eq!(g.index_bits(), 1);
    assert_eq!(g.tag_bits(), 1);
    assert_eq!(g.tag_of(u64::MAX), 1);
}

#[test]
fn test_compose_inverts_decomposition() {
    let g = Geometry::new(256, 16, 1).unwrap();
    let addr = 0b1111_0101_0001;
    let rebuilt = g.compose(g.tag_of(addr), g.index_of(addr) as u64, g.offset_of(addr));
    assert_eq!(rebuilt, addr);
}
