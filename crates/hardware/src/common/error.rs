//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Geometry rejected when a cache is constructed.
//! 2. **Access Errors:** Raw action codes outside the recognized set.
//! 3. **Trace Errors:** I/O failures and malformed trace lines.
//! 4. **Simulation Errors:** An umbrella type returned by the trace driver.
//!
//! All types derive [`thiserror::Error`] so they compose with `?` and
//! `std::error::Error` consumers.

use std::io;

use thiserror::Error;

/// Invalid cache geometry or system configuration.
///
/// Reported by [`Cache::new`](crate::cache::Cache::new) and
/// [`SimConfig::validate`](crate::config::SimConfig::validate); a cache is
/// never built from a configuration that fails these checks.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity of zero bytes.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    /// Block size of zero bytes.
    #[error("block size must be greater than zero")]
    ZeroBlockSize,

    /// Associativity of zero ways.
    #[error("associativity must be greater than zero")]
    ZeroAssociativity,

    /// Block size is not a power of two.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(u64),

    /// Capacity is not a whole number of blocks.
    #[error("capacity {capacity} is not a multiple of block size {block_size}")]
    CapacityNotDivisible {
        /// Configured capacity in bytes.
        capacity: u64,
        /// Configured block size in bytes.
        block_size: u64,
    },

    /// More lines than a cache is allowed to allocate.
    #[error("{num_lines} lines exceed the limit of {max} lines")]
    TooManyLines {
        /// Number of lines (`capacity / block_size`).
        num_lines: u64,
        /// Largest accepted line count.
        max: u64,
    },

    /// Associativity does not evenly divide the number of lines.
    #[error("associativity {associativity} does not divide {num_lines} lines")]
    AssociativityMismatch {
        /// Configured associativity.
        associativity: u64,
        /// Number of lines (`capacity / block_size`).
        num_lines: u64,
    },

    /// Derived set count is not a power of two.
    #[error("set count {0} is not a power of two")]
    SetCountNotPowerOfTwo(u64),

    /// Offset and index fields consume the whole address.
    #[error("{offset_bits} offset bits + {index_bits} index bits leave no tag bits")]
    AddressTooNarrow {
        /// Bits used by the block offset.
        offset_bits: u32,
        /// Bits used by the set index.
        index_bits: u32,
    },

    /// A system with no cores.
    #[error("core count must be greater than zero")]
    ZeroCores,
}

/// An access that could not be decoded.
///
/// Raised before any cache state is touched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Numeric action code outside `0..=3`.
    #[error("invalid action code {0}")]
    InvalidAction(u32),

    /// Action name that matches no known action.
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be read.
    #[error("could not read trace: {0}")]
    Io(#[from] io::Error),

    /// A line does not have the `<core> <action> <address>` shape.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A record names a core the system does not have.
    #[error("record {record}: core {core} out of range (system has {cores} cores)")]
    UnknownCore {
        /// 1-based position of the record in the trace.
        record: u64,
        /// Core named by the record.
        core: usize,
        /// Number of cores in the system.
        cores: usize,
    },
}

/// Any error produced while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Undecodable access.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Trace input failure.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// Report output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed.
    #[error("could not parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
