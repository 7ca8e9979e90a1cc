//! Cache simulator CLI.
//!
//! This binary runs a memory-access trace through one private cache per core
//! and reports statistics. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then command-line overrides.
//! 2. **Simulation:** Streams the trace through a `MultiCoreSystem`, broadcasting misses.
//! 3. **Reporting:** Scrapeable `key value` text (total first, then per core) or JSON.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::SimError;
use cachesim_core::config::{Protocol, SimConfig};
use cachesim_core::sim::{MultiCoreSystem, StepReport, TraceRecord, trace};
use cachesim_core::stats::StatsSummary;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Functional set-associative cache simulator",
    long_about = "Run a memory-access trace through one private cache per core and report hit/miss, writeback and bus traffic statistics.\n\nTrace lines are '<core> <action> <address>' with action LOAD, STORE, LD_MISS, ST_MISS (or 0-3).\n\nExamples:\n  cachesim -t trace.1t.long.txt -c 16 5 4\n  cachesim -t trace.4t.long.txt -p msi -n 4 -c 15 6 2 --json"
)]
struct Cli {
    /// Trace file to simulate.
    #[arg(short, long)]
    trace: PathBuf,

    /// Coherence protocol: none, vi or msi.
    #[arg(short, long)]
    protocol: Option<Protocol>,

    /// Number of cores (one private cache each).
    #[arg(short = 'n', long)]
    cores: Option<usize>,

    /// Cache geometry: log2(capacity) log2(block size) associativity.
    #[arg(short, long, num_args = 3, value_names = ["LOG2_CAP", "LOG2_BLOCK", "ASSOC"])]
    cache: Option<Vec<u64>>,

    /// Reuse a way invalidated by a remote store before any other (MSI).
    #[arg(long)]
    lru_on_invalidate: bool,

    /// JSON configuration file; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the set and way touched by every access.
    #[arg(long)]
    log_accesses: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace). Defaults to RUST_LOG or warn.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// JSON report: configuration, totals and per-core figures.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a SimConfig,
    total: StatsSummary,
    cores: Vec<StatsSummary>,
}

fn main() {
    let cli = Cli::parse_from(normalize_args(env::args_os()));
    init_logging(cli.verbose);

    let base = cli
        .config
        .as_deref()
        .map_or_else(SimConfig::default, load_config);
    let config = build_config(&cli, base).unwrap_or_else(|msg| {
        Cli::command()
            .error(ErrorKind::ValueValidation, msg)
            .exit()
    });

    if let Err(e) = run(&cli, &config) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Rewrites the single-dash `-cache` spelling used by sweep scripts to
/// `--cache`; clap would otherwise read it as `-c ache`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-cache" {
                OsString::from("--cache")
            } else {
                arg
            }
        })
        .collect()
}

/// Installs the stderr log subscriber.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("warn,cachesim_core=debug"),
        _ => EnvFilter::new("warn,cachesim_core=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads a JSON configuration file.
///
/// Exits the process with an error message if the file cannot be read or parsed.
fn load_config(path: &Path) -> SimConfig {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read config '{}': {}", path.display(), e);
        process::exit(1);
    });
    SimConfig::from_json(&text).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Invalid config '{}': {}", path.display(), e);
        process::exit(1);
    })
}

/// Applies command-line overrides on top of `base`.
fn build_config(cli: &Cli, mut base: SimConfig) -> Result<SimConfig, String> {
    if let Some(protocol) = cli.protocol {
        base.cache.protocol = protocol;
    }
    if let Some(cores) = cli.cores {
        base.cores = cores;
    }
    if let Some(geometry) = cli.cache.as_deref() {
        let [log2_cap, log2_block, assoc] = geometry else {
            return Err("--cache takes exactly three values".to_owned());
        };
        base.cache.capacity = pow2(*log2_cap, "LOG2_CAP")?;
        base.cache.block_size = pow2(*log2_block, "LOG2_BLOCK")?;
        base.cache.associativity = *assoc;
    }
    if cli.lru_on_invalidate {
        base.cache.lru_on_invalidate = true;
    }
    Ok(base)
}

/// Returns `2^exp`, rejecting exponents that do not fit in 64 bits.
fn pow2(exp: u64, name: &str) -> Result<u64, String> {
    u32::try_from(exp)
        .ok()
        .and_then(|e| 1u64.checked_shl(e))
        .ok_or_else(|| format!("{name} must be below 64, got {exp}"))
}

/// Runs the trace and prints the report.
fn run(cli: &Cli, config: &SimConfig) -> Result<(), SimError> {
    let mut system = MultiCoreSystem::new(config)?;
    let records = trace::open(&cli.trace)?;
    info!(
        trace = %cli.trace.display(),
        cores = config.cores,
        protocol = %config.cache.protocol,
        "simulation started"
    );

    let log_accesses = cli.log_accesses;
    system.run(records, |record, report| {
        if log_accesses {
            println!("{}", format_access(record, report));
        }
    })?;
    info!(records = system.records(), "simulation finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        let report = Report {
            config,
            total: system.total_summary(),
            cores: system.caches().iter().map(|c| c.summary()).collect(),
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_text_report(&mut out, &system, config)?;
    }
    Ok(())
}

/// One line per local access: core, action, address, set, way, result.
fn format_access(record: &TraceRecord, report: &StepReport) -> String {
    let local = &report.local;
    let way = local
        .way
        .map_or_else(|| "-".to_owned(), |w| w.to_string());
    let result = if local.upgrade_miss {
        "upgrade"
    } else if local.hit {
        "hit"
    } else {
        "miss"
    };
    format!(
        "core {} {:<7} {:#018x} set {:<5} way {:<3} {}{}",
        record.core,
        record.action,
        record.address,
        local.index,
        way,
        result,
        if local.writeback { " wb" } else { "" }
    )
}

fn write_text_report<W: Write>(
    out: &mut W,
    system: &MultiCoreSystem,
    config: &SimConfig,
) -> io::Result<()> {
    let block_size = config.cache.block_size;
    writeln!(out, "==========================================================")?;
    writeln!(out, "CACHE SIMULATION STATISTICS")?;
    writeln!(out, "==========================================================")?;
    writeln!(out, "  protocol                    {}", config.cache.protocol)?;
    writeln!(out, "  cores                       {}", system.cores())?;
    writeln!(out, "  capacity                    {}", config.cache.capacity)?;
    writeln!(out, "  block_size                  {block_size}")?;
    writeln!(out, "  associativity               {}", config.cache.associativity)?;
    writeln!(out, "  lru_on_invalidate           {}", config.cache.lru_on_invalidate)?;
    writeln!(out, "  records                     {}", system.records())?;
    writeln!(out, "----------------------------------------------------------")?;
    writeln!(out, "TOTAL")?;
    system.total_stats().write_report(out, block_size)?;
    if system.cores() > 1 {
        for (core, cache) in system.caches().iter().enumerate() {
            writeln!(out, "----------------------------------------------------------")?;
            writeln!(out, "CORE {core}")?;
            cache.stats().write_report(out, block_size)?;
        }
    }
    writeln!(out, "==========================================================")?;
    Ok(())
}
