//! Per-thread cache model.
//!
//! This module turns a stream of byte-range memory references into an LRU
//! reuse-distance profile. It provides:
//! 1. **Line Normalization:** Byte ranges are decomposed into the cache
//!    lines they touch; each line access gets its own timestamp.
//! 2. **Reuse Distances:** A last-use map plus the interval tree yield the
//!    number of distinct lines touched since the previous use, per access.
//! 3. **Counters:** Total line accesses, cold misses, and references that
//!    straddled a line boundary.
//!
//! Every model is owned and mutated by exactly one thread; the registry
//! only reads it during quiescent readout.

/// Reuse-distance histogram.
pub mod histogram;

/// Access trace stream.
pub mod trace;

pub use histogram::Histogram;

use std::collections::HashMap;
use std::path::Path;

use log::warn;

use crate::common::{AccessKind, ConfigError, LineAddr, Timestamp};
use crate::config::ModelConfig;
use crate::tree::IntervalTree;
use trace::TraceWriter;

/// LRU stack-distance model for one instrumented thread.
///
/// Feed it references via [`access`](ThreadModel::access); read the profile
/// back through the accessor methods once the thread has quiesced.
pub struct ThreadModel {
    line_size: u64,
    tree: IntervalTree,
    last_use: HashMap<LineAddr, Timestamp>,
    hits: Histogram,
    accesses: u64,
    split_accesses: u64,
    trace: Option<TraceWriter>,
}

impl ThreadModel {
    /// Builds a model from the given configuration.
    ///
    /// # Returns
    ///
    /// The model, or a [`ConfigError`] when the line size is zero or not a
    /// power of two. Tracing failures are not fatal: if the trace file
    /// cannot be created the model runs untraced and logs a warning.
    pub fn new(config: &ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let trace = config.trace_path.as_deref().and_then(open_trace);
        Ok(Self {
            line_size: config.line_size,
            tree: IntervalTree::new(),
            last_use: HashMap::new(),
            hits: Histogram::new(),
            accesses: 0,
            split_accesses: 0,
            trace,
        })
    }

    /// Records one memory reference of `num_bytes` bytes at `base_addr`.
    ///
    /// Every cache line overlapped by the range is counted as one
    /// line-granular access at its own timestamp. A zero-length reference
    /// still touches the line containing its address. The access kind only
    /// feeds the trace stream; the LRU model ignores it.
    pub fn access(&mut self, base_addr: u64, num_bytes: u64, kind: AccessKind) {
        let first = LineAddr::containing(base_addr, self.line_size);
        let last = LineAddr::containing(base_addr + num_bytes, self.line_size);

        let mut touched = 0u64;
        for line in first.val()..=last.val() {
            let now = Timestamp::new(self.accesses + touched);
            match self.last_use.insert(LineAddr::new(line), now) {
                Some(prev) => {
                    // The count of holes above the previous use is exactly
                    // the number of timestamps in between whose lines were
                    // re-touched later, so subtracting it leaves the
                    // distinct-line reuse distance.
                    let masked = self.tree.distance(prev.val());
                    let distance = now.val() - prev.val() - masked;
                    debug_assert!(distance >= 1, "a line cannot be its own reuse");
                    self.hits.observe(distance);
                }
                None => self.hits.push_cold_bucket(),
            }
            touched += 1;
        }

        self.accesses += touched;
        if touched > 1 {
            // One split event per original reference, however many lines
            // it crossed.
            self.split_accesses += 1;
        }

        if let Some(writer) = &mut self.trace {
            if let Err(err) = writer.record(kind, base_addr) {
                warn!("access trace disabled after write failure: {}", err);
                self.trace = None;
            }
        }
    }

    /// Total line-granular accesses recorded.
    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Number of distinct lines touched, i.e. references that missed every
    /// cache size.
    pub fn cold_misses(&self) -> u64 {
        self.hits.len() as u64
    }

    /// Number of original references that straddled a line boundary.
    pub fn split_accesses(&self) -> u64 {
        self.split_accesses
    }

    /// The per-distance reuse histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.hits
    }

    /// The configured line size in bytes.
    pub fn line_size(&self) -> u64 {
        self.line_size
    }
}

fn open_trace(path: &Path) -> Option<TraceWriter> {
    match TraceWriter::create(path) {
        Ok(writer) => Some(writer),
        Err(err) => {
            warn!("cannot create access trace {}: {}", path.display(), err);
            None
        }
    }
}
