//! Interval Tree `distance` Unit Tests.
//!
//! Verifies the search/insert cases one shape at a time: first insert,
//! strict descents with gaps, adjacent extension on both sides, and the
//! two bridge merges. Every test re-validates the structural invariants
//! after the calls it makes.
//!
//! The worked mixture at the bottom walks a six-call sequence whose
//! per-call counts and final interval set were computed by hand.

use stackdist_core::tree::IntervalTree;

/// Runs a hole sequence, asserting the expected count per call and a clean
/// validator after every call.
fn run_expecting(holes: &[u64], expected: &[u64]) -> IntervalTree {
    assert_eq!(holes.len(), expected.len(), "malformed test fixture");
    let mut tree = IntervalTree::new();
    for (&hole, &want) in holes.iter().zip(expected) {
        let got = tree.distance(hole);
        assert_eq!(
            got, want,
            "distance({}) in sequence {:?}: got {}, want {}",
            hole, holes, got, want
        );
        tree.validate()
            .unwrap_or_else(|violation| panic!("after distance({}): {}", hole, violation));
    }
    tree
}

// ══════════════════════════════════════════════════════════
// 1. First insert
// ══════════════════════════════════════════════════════════

/// The first hole roots the tree and nothing lies above it.
#[test]
fn first_insert_counts_nothing() {
    let tree = run_expecting(&[42], &[0]);
    assert_eq!(tree.intervals(), vec![(42, 42)]);
    assert_eq!(tree.interval_count(), 1);
    assert_eq!(tree.stored_holes(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Adjacent extension
// ══════════════════════════════════════════════════════════

/// Descending adjacent holes extend one interval leftward; each call sees
/// every previously stored hole above it.
#[test]
fn descending_adjacent_run_extends_left() {
    let tree = run_expecting(&[9, 8, 7], &[0, 1, 2]);
    assert_eq!(tree.intervals(), vec![(7, 9)]);
    assert_eq!(tree.interval_count(), 1, "extensions must not add nodes");
}

/// Ascending adjacent holes extend one interval rightward; nothing is ever
/// above the newest hole.
#[test]
fn ascending_adjacent_run_extends_right() {
    let tree = run_expecting(&[1, 2, 3], &[0, 0, 0]);
    assert_eq!(tree.intervals(), vec![(1, 3)]);
    assert_eq!(tree.interval_count(), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Strict descents (gaps on both sides)
// ══════════════════════════════════════════════════════════

/// Gapped descending inserts descend left, accumulating the widths above.
#[test]
fn gapped_descent_accumulates_widths_above() {
    let tree = run_expecting(&[10, 7, 4], &[0, 1, 2]);
    assert_eq!(tree.intervals(), vec![(4, 4), (7, 7), (10, 10)]);
    assert_eq!(tree.stored_holes(), 3);
}

/// Gapped ascending inserts descend right; the new hole is always the
/// greatest stored value.
#[test]
fn gapped_ascent_counts_nothing_above() {
    let tree = run_expecting(&[0, 5, 10], &[0, 0, 0]);
    assert_eq!(tree.intervals(), vec![(0, 0), (5, 5), (10, 10)]);
}

// ══════════════════════════════════════════════════════════
// 4. Bridge merges
// ══════════════════════════════════════════════════════════

/// A hole one above an interval whose successor starts one higher bridges
/// the two; the successor node is retired.
#[test]
fn bridge_into_successor_merges_intervals() {
    let tree = run_expecting(&[0, 2, 1], &[0, 0, 1]);
    assert_eq!(tree.intervals(), vec![(0, 2)]);
    assert_eq!(tree.interval_count(), 1, "merge must retire a node");
    assert_eq!(tree.stored_holes(), 3);
}

/// A hole one below an interval whose predecessor ends one lower bridges
/// the two; the predecessor node is retired.
#[test]
fn bridge_into_predecessor_merges_intervals() {
    let tree = run_expecting(&[2, 0, 1], &[0, 1, 1]);
    assert_eq!(tree.intervals(), vec![(0, 2)]);
    assert_eq!(tree.interval_count(), 1);
}

// ══════════════════════════════════════════════════════════
// 5. Worked mixture
// ══════════════════════════════════════════════════════════

/// Six calls covering every case in one tree: gapped ascents, a rotation
/// from the insert rebalance, a rightward extension, and a
/// predecessor-bridge merge that pulls width out of an ancestor sum.
///
/// Hole set evolution: {0} {0,5} {0,5,10} {0,2,5,10} {0,2,3,5,10}
/// {0,2,3,4,5,10}; counts above each inserted hole follow directly.
#[test]
fn worked_mixture_of_all_cases() {
    let tree = run_expecting(&[0, 5, 10, 2, 3, 4], &[0, 0, 0, 2, 2, 2]);
    assert_eq!(tree.intervals(), vec![(0, 0), (2, 5), (10, 10)]);
    assert_eq!(tree.interval_count(), 3);
    assert_eq!(tree.stored_holes(), 6);
}

/// Recycled arena slots keep working: grow, merge down, grow again.
#[test]
fn merge_then_regrow_reuses_retired_nodes() {
    let mut tree = IntervalTree::new();
    for &hole in &[0, 2, 1, 10, 12, 11, 6] {
        tree.distance(hole);
        tree.validate().expect("tree stays valid");
    }
    // {0..2} {10..12} {6}: both triples merged through retired nodes.
    assert_eq!(tree.intervals(), vec![(0, 2), (6, 6), (10, 12)]);
    assert_eq!(tree.stored_holes(), 7);
}
