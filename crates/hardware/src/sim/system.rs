//! Multi-core trace driver.
//!
//! Each core owns a private [`Cache`]. Coherence is modeled only through
//! the action taxonomy: when a core's load or store does not hit, the
//! matching notification (`LD_MISS` or `ST_MISS`) is broadcast to every
//! other core's cache, in core order, before the next record is processed.
//! There is no interconnect timing and no data transfer.

use tracing::debug;

use super::trace::TraceRecord;
use crate::cache::{AccessOutcome, Cache};
use crate::common::{SimError, TraceError};
use crate::config::SimConfig;
use crate::stats::{CacheStats, StatsSummary};

/// Result of one trace record: the issuing core's outcome and the outcome
/// of every notification it caused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Core that issued the record.
    pub core: usize,
    /// Outcome in the issuing core's cache.
    pub local: AccessOutcome,
    /// `(core, outcome)` for each cache that observed a notification.
    pub snoops: Vec<(usize, AccessOutcome)>,
}

/// A set of private caches joined by a broadcast bus.
#[derive(Debug)]
pub struct MultiCoreSystem {
    caches: Vec<Cache>,
    records: u64,
}

impl MultiCoreSystem {
    /// Builds one cache per core from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the core count or geometry is invalid.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let geometry = config.validate()?;
        let caches = (0..config.cores)
            .map(|_| Cache::with_geometry(&config.cache, geometry))
            .collect();
        Ok(Self {
            caches,
            records: 0,
        })
    }

    /// Number of cores.
    pub fn cores(&self) -> usize {
        self.caches.len()
    }

    /// Records processed so far.
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Cache of core `core`.
    pub fn cache(&self, core: usize) -> Option<&Cache> {
        self.caches.get(core)
    }

    /// All caches in core order.
    pub fn caches(&self) -> &[Cache] {
        &self.caches
    }

    /// Applies one record and broadcasts the notification it causes.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::UnknownCore`] if the record names a core the
    /// system does not have; no cache is touched.
    pub fn step(&mut self, record: TraceRecord) -> Result<StepReport, TraceError> {
        let cores = self.caches.len();
        let cache = self
            .caches
            .get_mut(record.core)
            .ok_or(TraceError::UnknownCore {
                record: self.records + 1,
                core: record.core,
                cores,
            })?;

        let local = cache.access(record.address, record.action);
        self.records += 1;

        let mut snoops = Vec::new();
        if let Some(notification) = record.action.snoop().filter(|_| !local.hit) {
            debug!(
                core = record.core,
                %notification,
                addr = record.address,
                "broadcast"
            );
            for (core, other) in self.caches.iter_mut().enumerate() {
                if core != record.core {
                    snoops.push((core, other.access(record.address, notification)));
                }
            }
        }

        Ok(StepReport {
            core: record.core,
            local,
            snoops,
        })
    }

    /// Drives a whole trace, stopping at the first error.
    ///
    /// `on_step` sees every report, e.g. for access logging.
    ///
    /// # Errors
    ///
    /// Returns the first trace or step error.
    pub fn run<I, F>(&mut self, records: I, mut on_step: F) -> Result<(), SimError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
        F: FnMut(&TraceRecord, &StepReport),
    {
        for record in records {
            let record = record?;
            let report = self.step(record)?;
            on_step(&record, &report);
        }
        Ok(())
    }

    /// Counters of every cache merged together.
    pub fn total_stats(&self) -> CacheStats {
        let mut total = CacheStats::default();
        for cache in &self.caches {
            total += *cache.stats();
        }
        total
    }

    /// Merged counters with derived figures.
    pub fn total_summary(&self) -> StatsSummary {
        let block_size = self
            .caches
            .first()
            .map_or(0, |c| c.geometry().block_size());
        self.total_stats().summary(block_size)
    }
}
