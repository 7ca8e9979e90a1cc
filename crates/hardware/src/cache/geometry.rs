//! Cache geometry and address decomposition.
//!
//! A [`Geometry`] is derived once from capacity, block size and
//! associativity. It splits an address into three disjoint fields:
//!
//! ```text
//!  63                                           0
//! +------------------+--------------+-------------+
//! |       tag        |    index     |   offset    |
//! +------------------+--------------+-------------+
//!   tag_bits           index_bits     offset_bits
//! ```
//!
//! Only tag and index take part in lookups; the offset selects a byte
//! within a block and never affects hit or miss.

use crate::common::{ADDRESS_WIDTH, ConfigError, MAX_LINES};

/// Validated cache geometry.
///
/// Invariants, checked by [`Geometry::new`]:
/// - `block_size` and `num_sets` are powers of two,
/// - `num_sets * associativity == num_lines`, with at most [`MAX_LINES`] lines,
/// - `offset_bits + index_bits + tag_bits == ADDRESS_WIDTH` with `tag_bits > 0`.
///
/// # Examples
///
/// A 16-set cache with 16-byte blocks uses 4 offset bits and 4 index bits:
///
/// ```
/// use cachesim_core::cache::Geometry;
///
/// let g = Geometry::new(256, 16, 1).unwrap();
/// assert_eq!(g.tag_of(0b1111_0101_0001), 0b1111);
/// assert_eq!(g.index_of(0b1111_0101_0001), 0b0101);
/// assert_eq!(g.block_address_of(3921), 3920);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    capacity: u64,
    block_size: u64,
    associativity: u64,
    num_lines: u64,
    num_sets: u64,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

impl Geometry {
    /// Validates a cache shape and derives its bit fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a size is zero, the block size or the
    /// set count is not a power of two, the capacity is not a whole number of
    /// blocks, the line count exceeds [`MAX_LINES`], or the associativity
    /// does not divide the line count.
    pub const fn new(
        capacity: u64,
        block_size: u64,
        associativity: u64,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if !block_size.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_size));
        }
        if capacity % block_size != 0 {
            return Err(ConfigError::CapacityNotDivisible {
                capacity,
                block_size,
            });
        }

        let num_lines = capacity / block_size;
        if num_lines > MAX_LINES {
            return Err(ConfigError::TooManyLines {
                num_lines,
                max: MAX_LINES,
            });
        }
        if num_lines % associativity != 0 {
            return Err(ConfigError::AssociativityMismatch {
                associativity,
                num_lines,
            });
        }

        let num_sets = num_lines / associativity;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }

        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits >= ADDRESS_WIDTH {
            return Err(ConfigError::AddressTooNarrow {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            capacity,
            block_size,
            associativity,
            num_lines,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_WIDTH - offset_bits - index_bits,
        })
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Ways per set.
    #[inline]
    pub const fn associativity(&self) -> u64 {
        self.associativity
    }

    /// Total number of lines (`capacity / block_size`).
    #[inline]
    pub const fn num_lines(&self) -> u64 {
        self.num_lines
    }

    /// Number of sets (`num_lines / associativity`).
    #[inline]
    pub const fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Width of the block offset field.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Returns the tag field of `addr`.
    #[inline]
    pub const fn tag_of(&self, addr: u64) -> u64 {
        addr >> (ADDRESS_WIDTH - self.tag_bits)
    }

    /// Returns the set index of `addr`.
    #[inline]
    pub const fn index_of(&self, addr: u64) -> usize {
        ((addr >> self.offset_bits) & (self.num_sets - 1)) as usize
    }

    /// Returns the byte offset of `addr` within its block.
    #[inline]
    pub const fn offset_of(&self, addr: u64) -> u64 {
        addr & (self.block_size - 1)
    }

    /// Returns `addr` with the offset bits cleared.
    #[inline]
    pub const fn block_address_of(&self, addr: u64) -> u64 {
        addr & !(self.block_size - 1)
    }

    /// Reassembles an address from its three fields.
    ///
    /// Fields wider than their bit width are truncated.
    pub const fn compose(&self, tag: u64, index: u64, offset: u64) -> u64 {
        let tag_shift = self.offset_bits + self.index_bits;
        (tag << tag_shift)
            | ((index & (self.num_sets - 1)) << self.offset_bits)
            | (offset & (self.block_size - 1))
    }
}
