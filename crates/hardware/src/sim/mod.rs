//! Trace-driven simulation.
//!
//! Provides the trace reader and the multi-core driver that feeds records
//! to per-core caches and broadcasts coherence notifications.

/// Multi-core driver.
pub mod system;

/// Trace file parsing.
pub mod trace;

pub use system::{MultiCoreSystem, StepReport};
pub use trace::{TraceReader, TraceRecord};
