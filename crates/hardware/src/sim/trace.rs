//! Trace Parsing.
//!
//! A trace is plain text with one event per line:
//!
//! ```text
//! # core action address
//! 0 LOAD  0x7fff1000
//! 1 1     0x7fff1000
//! ```
//!
//! `action` is a wire code (`0`..=`3`) or a name (`LOAD`, `STORE`, `LD_MISS`,
//! `ST_MISS`). `address` is hex with a `0x` prefix, decimal otherwise. Blank
//! lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::common::{Action, TraceError};

/// One trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Core issuing the event.
    pub core: usize,
    /// What the core did.
    pub action: Action,
    /// Byte address.
    pub address: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(core: usize, action: Action, address: u64) -> Self {
        Self {
            core,
            action,
            address,
        }
    }
}

/// Parses an address: hex with `0x`/`0X`, decimal otherwise.
pub fn parse_address(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Parses one trace line; `line` is its 1-based number for error messages.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns [`TraceError::Malformed`] when a field is missing, extra or
/// cannot be parsed.
pub fn parse_line(text: &str, line: usize) -> Result<Option<TraceRecord>, TraceError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: String| TraceError::Malformed { line, reason };
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [core, action, address] = fields[..] else {
        return Err(malformed(format!(
            "expected '<core> <action> <address>', found {} fields",
            fields.len()
        )));
    };

    let core = core
        .parse::<usize>()
        .map_err(|_| malformed(format!("invalid core id '{core}'")))?;
    let action = action
        .parse::<Action>()
        .map_err(|e| malformed(e.to_string()))?;
    let address =
        parse_address(address).ok_or_else(|| malformed(format!("invalid address '{address}'")))?;

    Ok(Some(TraceRecord::new(core, action, address)))
}

/// Streaming reader over a trace.
///
/// Yields records in file order; an I/O or parse error is yielded in place
/// of the offending record.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line += 1;
            match parse_line(&text, self.line) {
                Ok(None) => {}
                Ok(Some(record)) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Opens a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened.
pub fn open(path: impl AsRef<Path>) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let file = File::open(path)?;
    Ok(TraceReader::new(BufReader::new(file)))
}
