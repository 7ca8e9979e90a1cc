//! Cache statistics collection and reporting.
//!
//! This module accumulates the events a cache emits and derives the figures
//! used to study a trace. It provides:
//! 1. **Counters:** CPU accesses, hits, stores, writebacks, upgrade misses, snoops.
//! 2. **Rates:** Hit and miss rate over local accesses.
//! 3. **Bus traffic:** Bytes moved for write-back and write-through policies.
//! 4. **Reports:** Scrapeable `key value` text and a serializable summary.

use std::io::{self, Write};
use std::ops::AddAssign;

use serde::Serialize;

use crate::cache::AccessOutcome;
use crate::common::WORD_SIZE;

/// Cumulative counters for one cache (or several, merged with `+=`).
///
/// Local requests (`LOAD`/`STORE`) and coherence notifications are counted
/// separately so notifications never dilute the hit rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Local loads and stores.
    pub cpu_accesses: u64,
    /// Local accesses reported as hits.
    pub hits: u64,
    /// Local stores.
    pub stores: u64,
    /// Dirty blocks written back (evictions and downgrades).
    pub writebacks: u64,
    /// Stores that upgraded a Shared copy.
    pub upgrade_misses: u64,
    /// Coherence notifications observed.
    pub bus_snoops: u64,
    /// Notifications that found a resident copy.
    pub snoop_hits: u64,
}

impl CacheStats {
    /// Counts one access.
    pub fn record(&mut self, outcome: &AccessOutcome) {
        if outcome.writeback {
            self.writebacks += 1;
        }
        if outcome.action.is_snoop() {
            self.bus_snoops += 1;
            if outcome.hit {
                self.snoop_hits += 1;
            }
            return;
        }

        self.cpu_accesses += 1;
        if outcome.hit {
            self.hits += 1;
        }
        if outcome.action.is_write() {
            self.stores += 1;
        }
        if outcome.upgrade_miss {
            self.upgrade_misses += 1;
        }
    }

    /// Local accesses that did not hit (upgrade misses included).
    pub const fn misses(&self) -> u64 {
        self.cpu_accesses - self.hits
    }

    /// Fraction of local accesses that hit; 0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        if self.cpu_accesses == 0 {
            return 0.0;
        }
        self.hits as f64 / self.cpu_accesses as f64
    }

    /// Fraction of local accesses that missed; 0 when there were none.
    pub fn miss_rate(&self) -> f64 {
        if self.cpu_accesses == 0 {
            return 0.0;
        }
        self.misses() as f64 / self.cpu_accesses as f64
    }

    /// Bytes fetched into the cache. Upgrade misses move no data.
    pub const fn bytes_bus_to_cache(&self, block_size: u64) -> u64 {
        (self.misses() - self.upgrade_misses) * block_size
    }

    /// Bytes written to the bus by a write-back cache.
    pub const fn bytes_cache_to_bus_wb(&self, block_size: u64) -> u64 {
        self.writebacks * block_size
    }

    /// Bytes written to the bus by a write-through cache (one word per store).
    pub const fn bytes_cache_to_bus_wt(&self) -> u64 {
        self.stores * WORD_SIZE
    }

    /// Counters and derived figures for `block_size`-byte blocks.
    pub fn summary(&self, block_size: u64) -> StatsSummary {
        let bus_to_cache = self.bytes_bus_to_cache(block_size);
        let wb = self.bytes_cache_to_bus_wb(block_size);
        let wt = self.bytes_cache_to_bus_wt();
        StatsSummary {
            counters: *self,
            misses: self.misses(),
            hit_rate: self.hit_rate(),
            miss_rate: self.miss_rate(),
            bytes_bus_to_cache: bus_to_cache,
            bytes_cache_to_bus_wb: wb,
            bytes_cache_to_bus_wt: wt,
            total_traffic_wb: bus_to_cache + wb,
            total_traffic_wt: bus_to_cache + wt,
        }
    }

    /// Writes a `key value` report, one figure per line.
    ///
    /// Rates are printed as percentages. Keys are stable so sweep scripts can
    /// scrape them (e.g. `miss_rate`, `B_written_cache_to_bus_wb`).
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_report<W: Write>(&self, out: &mut W, block_size: u64) -> io::Result<()> {
        let s = self.summary(block_size);
        writeln!(out, "  n_cpu_accesses              {}", self.cpu_accesses)?;
        writeln!(out, "  n_hits                      {}", self.hits)?;
        writeln!(out, "  n_misses                    {}", s.misses)?;
        writeln!(out, "  n_stores                    {}", self.stores)?;
        writeln!(out, "  n_writebacks                {}", self.writebacks)?;
        writeln!(out, "  n_upgrade_miss              {}", self.upgrade_misses)?;
        writeln!(out, "  n_bus_snoops                {}", self.bus_snoops)?;
        writeln!(out, "  n_snoop_hits                {}", self.snoop_hits)?;
        writeln!(out, "  hit_rate                    {:.2}", s.hit_rate * 100.0)?;
        writeln!(out, "  miss_rate                   {:.2}", s.miss_rate * 100.0)?;
        writeln!(out, "  B_written_bus_to_cache      {}", s.bytes_bus_to_cache)?;
        writeln!(out, "  B_written_cache_to_bus_wb   {}", s.bytes_cache_to_bus_wb)?;
        writeln!(out, "  B_written_cache_to_bus_wt   {}", s.bytes_cache_to_bus_wt)?;
        writeln!(out, "  B_total_traffic_wb          {}", s.total_traffic_wb)?;
        writeln!(out, "  B_total_traffic_wt          {}", s.total_traffic_wt)?;
        Ok(())
    }
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cpu_accesses += rhs.cpu_accesses;
        self.hits += rhs.hits;
        self.stores += rhs.stores;
        self.writebacks += rhs.writebacks;
        self.upgrade_misses += rhs.upgrade_misses;
        self.bus_snoops += rhs.bus_snoops;
        self.snoop_hits += rhs.snoop_hits;
    }
}

/// Counters with every derived figure, as exported to JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Raw counters.
    #[serde(flatten)]
    pub counters: CacheStats,
    /// Local misses.
    pub misses: u64,
    /// Hit rate as a fraction.
    pub hit_rate: f64,
    /// Miss rate as a fraction.
    pub miss_rate: f64,
    /// Bytes fetched from the bus.
    pub bytes_bus_to_cache: u64,
    /// Bytes written back under a write-back policy.
    pub bytes_cache_to_bus_wb: u64,
    /// Bytes written under a write-through policy.
    pub bytes_cache_to_bus_wt: u64,
    /// Fetch plus write-back traffic.
    pub total_traffic_wb: u64,
    /// Fetch plus write-through traffic.
    pub total_traffic_wt: u64,
}
