//! Common types used throughout the cache simulator.
//!
//! This module provides the small building blocks shared by the cache model,
//! the statistics accumulator and the trace driver. It includes:
//! 1. **Constants:** Address width, line limit and bus word size.
//! 2. **Actions:** The access taxonomy (local loads/stores and coherence notifications).
//! 3. **Error Handling:** Configuration, access and trace error types.

/// Access actions (local requests and coherence notifications).
pub mod action;

/// Simulator-wide constants.
pub mod constants;

/// Error types for configuration, access decoding and trace input.
pub mod error;

pub use action::Action;
pub use constants::{ADDRESS_WIDTH, MAX_LINES, WORD_SIZE};
pub use error::{AccessError, ConfigError, SimError, TraceError};
