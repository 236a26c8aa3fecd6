//! Reuse-distance histogram.
//!
//! Bucket `k` counts references whose reuse distance was exactly `k + 1`; a
//! distance of zero is impossible (a line cannot be its own reuse), so the
//! zero bucket is packed out. The histogram grows by one zero bucket per
//! cold miss, which keeps its length equal to the number of distinct lines
//! the owning thread has touched.

/// Growable bucket vector of reuse-distance counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Histogram {
    buckets: Vec<u64>,
}

impl Histogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fresh zero bucket for a cold miss.
    #[inline]
    pub fn push_cold_bucket(&mut self) {
        self.buckets.push(0);
    }

    /// Counts one reference at the given reuse distance.
    ///
    /// `distance` must be at least 1. Capacity for `distance` is normally
    /// guaranteed by the cold miss that introduced the distance's furthest
    /// line; a shortfall means the surrounding model is broken, so debug
    /// builds assert and release builds grow defensively.
    #[inline]
    pub fn observe(&mut self, distance: u64) {
        debug_assert!(distance >= 1, "reuse distance of zero is impossible");
        let bucket = (distance - 1) as usize;
        if bucket >= self.buckets.len() {
            debug_assert!(
                false,
                "reuse distance {} exceeds histogram length {}",
                distance,
                self.buckets.len()
            );
            self.buckets.resize(bucket + 1, 0);
        }
        self.buckets[bucket] += 1;
    }

    /// Number of buckets, equal to the owning thread's cold-miss count.
    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no bucket exists yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The raw per-distance counts.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.buckets
    }

    /// The count in bucket `i` (distance `i + 1`), zero past the end.
    #[inline]
    pub fn bucket(&self, i: usize) -> u64 {
        self.buckets.get(i).copied().unwrap_or(0)
    }
}
