//! Merged profile snapshot and derived metrics.
//!
//! A [`ProfileSnapshot`] is the quiescent readout of the whole process:
//! merged counters plus the cumulative hits vector. Rendering is the
//! caller's concern; this module only derives numbers from the snapshot.

/// Point-in-time merged profile across all instrumented threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileSnapshot {
    /// Total line-granular accesses.
    pub accesses: u64,
    /// Total distinct lines touched (references no cache size can serve).
    pub cold_misses: u64,
    /// Original references that straddled a cache-line boundary.
    pub split_accesses: u64,
    /// Cumulative hit counts; element `i` is the hit count of a
    /// fully-associative LRU cache of `i + 1` lines.
    pub hits: Vec<u64>,
}

impl ProfileSnapshot {
    /// Hit count of a fully-associative LRU cache holding `capacity` lines.
    ///
    /// A zero-line cache hits nothing; capacities beyond the largest
    /// observed reuse distance saturate at [`max_hits`](Self::max_hits).
    pub fn hits_at_capacity(&self, capacity: usize) -> u64 {
        if capacity == 0 {
            return 0;
        }
        match self.hits.get(capacity - 1) {
            Some(&hits) => hits,
            None => self.max_hits(),
        }
    }

    /// Miss count of a fully-associative LRU cache holding `capacity` lines.
    pub fn misses_at_capacity(&self, capacity: usize) -> u64 {
        self.accesses - self.hits_at_capacity(capacity)
    }

    /// Hit rate of a fully-associative LRU cache holding `capacity` lines,
    /// in `[0.0, 1.0]`. Zero when no access was recorded.
    pub fn hit_rate_at_capacity(&self, capacity: usize) -> f64 {
        if self.accesses == 0 {
            return 0.0;
        }
        self.hits_at_capacity(capacity) as f64 / self.accesses as f64
    }

    /// Hit count at unbounded capacity: every access that was not a cold
    /// miss.
    pub fn max_hits(&self) -> u64 {
        self.hits.last().copied().unwrap_or(0)
    }
}
