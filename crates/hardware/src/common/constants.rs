//! Global Simulator Constants.
//!
//! This module defines the fixed parameters of the simulated machine:
//! 1. **Address Constants:** Width of a physical address in bits.
//! 2. **Storage Constants:** Upper bound on the lines a cache may allocate.
//! 3. **Bus Constants:** Size of a single write-through bus transfer.

/// Width of a simulated address in bits.
///
/// Tag, index and offset fields always add up to exactly this many bits.
pub const ADDRESS_WIDTH: u32 = 64;

/// Largest number of lines (`capacity / block_size`) a cache may hold.
///
/// Every line is allocated up front, so larger geometries are rejected as
/// configuration errors rather than failing allocation.
pub const MAX_LINES: u64 = 1 << 24;

/// Size in bytes of one word written to the bus by a write-through store.
pub const WORD_SIZE: u64 = 4;
