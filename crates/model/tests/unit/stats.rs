//! Profile Snapshot Tests.
//!
//! Verifies the derived metrics of [`ProfileSnapshot`] against a
//! hand-written profile and the degenerate empty case.

use stackdist_core::ProfileSnapshot;

fn sample() -> ProfileSnapshot {
    // 10 accesses over 4 distinct lines; reuse distances 1, 2, 2, and two
    // at 3 or more — cumulative hits [1, 3, 6].
    ProfileSnapshot {
        accesses: 10,
        cold_misses: 4,
        split_accesses: 1,
        hits: vec![1, 3, 6],
    }
}

/// Capacity lookups: zero capacity hits nothing, indices shift by one, and
/// capacities past the vector saturate at the maximum.
#[test]
fn hits_by_capacity() {
    let snapshot = sample();
    assert_eq!(snapshot.hits_at_capacity(0), 0);
    assert_eq!(snapshot.hits_at_capacity(1), 1);
    assert_eq!(snapshot.hits_at_capacity(2), 3);
    assert_eq!(snapshot.hits_at_capacity(3), 6);
    assert_eq!(snapshot.hits_at_capacity(100), 6, "saturates past the end");
    assert_eq!(snapshot.max_hits(), 6);
}

/// Misses complement hits at every capacity.
#[test]
fn misses_by_capacity() {
    let snapshot = sample();
    assert_eq!(snapshot.misses_at_capacity(0), 10);
    assert_eq!(snapshot.misses_at_capacity(1), 9);
    assert_eq!(snapshot.misses_at_capacity(3), 4);
    assert_eq!(
        snapshot.misses_at_capacity(100),
        snapshot.cold_misses,
        "at unbounded capacity only cold misses remain"
    );
}

/// Hit rates divide by total accesses and stay inside [0, 1].
#[test]
fn hit_rates() {
    let snapshot = sample();
    assert_eq!(snapshot.hit_rate_at_capacity(0), 0.0);
    assert!((snapshot.hit_rate_at_capacity(2) - 0.3).abs() < 1e-12);
    assert!((snapshot.hit_rate_at_capacity(3) - 0.6).abs() < 1e-12);
}

/// The empty snapshot is all zeros and never divides by zero.
#[test]
fn empty_snapshot() {
    let snapshot = ProfileSnapshot::default();
    assert_eq!(snapshot.hits_at_capacity(5), 0);
    assert_eq!(snapshot.misses_at_capacity(5), 0);
    assert_eq!(snapshot.hit_rate_at_capacity(5), 0.0);
    assert_eq!(snapshot.max_hits(), 0);
}
