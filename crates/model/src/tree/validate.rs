//! Structural audit of the interval tree.
//!
//! Observation-only checks covering the red-black shape, the interval
//! ordering, and the right-subtree sum augment. Nothing here runs on the
//! hot path; tests call [`IntervalTree::validate`] after mutations to pin
//! the data structure's invariants.

use std::fmt;

use super::{Color, IntervalTree, NodeId, NIL};

/// A broken structural invariant found by [`IntervalTree::validate`].
///
/// Intervals are reported as `(left_key, right_key)` pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RootNotBlack,

    /// A red node has a red child.
    RedRedViolation {
        /// The offending parent interval.
        parent: (u64, u64),
        /// Its red child interval.
        child: (u64, u64),
    },

    /// Two root-to-sentinel paths disagree on black-node count.
    BlackHeightMismatch {
        /// The interval at which the subtree heights diverge.
        node: (u64, u64),
        /// Black height of the left subtree.
        left: u64,
        /// Black height of the right subtree.
        right: u64,
    },

    /// A node's `sum` does not equal its right subtree's total width.
    SumMismatch {
        /// The interval carrying the stale augment.
        node: (u64, u64),
        /// The stored `sum`.
        stored: u64,
        /// The recomputed right-subtree width.
        actual: u64,
    },

    /// An interval with `left_key > right_key`.
    InvertedInterval {
        /// The malformed interval.
        node: (u64, u64),
    },

    /// In-order neighbors that overlap, touch, or are out of order.
    ///
    /// Adjacent intervals must have been merged on insert, so even
    /// `[a, b], [b + 1, c]` is a violation.
    OrderViolation {
        /// The interval found on the wrong side.
        node: (u64, u64),
        /// The subtree extreme it collides with.
        neighbor: (u64, u64),
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RootNotBlack => write!(f, "root node is red"),
            InvariantViolation::RedRedViolation { parent, child } => write!(
                f,
                "red node [{}, {}] has red child [{}, {}]",
                parent.0, parent.1, child.0, child.1
            ),
            InvariantViolation::BlackHeightMismatch { node, left, right } => write!(
                f,
                "black height diverges at [{}, {}]: left {}, right {}",
                node.0, node.1, left, right
            ),
            InvariantViolation::SumMismatch {
                node,
                stored,
                actual,
            } => write!(
                f,
                "node [{}, {}] stores sum {} but its right subtree holds {}",
                node.0, node.1, stored, actual
            ),
            InvariantViolation::InvertedInterval { node } => {
                write!(f, "inverted interval [{}, {}]", node.0, node.1)
            }
            InvariantViolation::OrderViolation { node, neighbor } => write!(
                f,
                "interval [{}, {}] not separated from neighbor [{}, {}]",
                node.0, node.1, neighbor.0, neighbor.1
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Facts gathered from one subtree: black height, total width, and the
/// lowest/highest interval (absent for the sentinel).
struct SubtreeFacts {
    black_height: u64,
    width: u64,
    lowest: Option<(u64, u64)>,
    highest: Option<(u64, u64)>,
}

impl IntervalTree {
    /// Checks every structural invariant of the tree.
    ///
    /// # Returns
    ///
    /// `Ok(())` when the tree is a well-formed augmented red-black tree of
    /// pairwise disjoint, non-adjacent, ordered intervals; otherwise the
    /// first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.root != NIL && self.is_red(self.root) {
            return Err(InvariantViolation::RootNotBlack);
        }
        self.audit(self.root).map(|_| ())
    }

    fn audit(&self, id: NodeId) -> Result<SubtreeFacts, InvariantViolation> {
        if id == NIL {
            return Ok(SubtreeFacts {
                black_height: 1,
                width: 0,
                lowest: None,
                highest: None,
            });
        }

        let node = &self.nodes[id as usize];
        let keys = (node.left_key, node.right_key);

        if node.left_key > node.right_key {
            return Err(InvariantViolation::InvertedInterval { node: keys });
        }
        if node.color == Color::Red {
            for child in [node.left, node.right] {
                if self.is_red(child) {
                    let c = &self.nodes[child as usize];
                    return Err(InvariantViolation::RedRedViolation {
                        parent: keys,
                        child: (c.left_key, c.right_key),
                    });
                }
            }
        }

        let left = self.audit(node.left)?;
        let right = self.audit(node.right)?;

        if left.black_height != right.black_height {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: keys,
                left: left.black_height,
                right: right.black_height,
            });
        }
        if node.sum != right.width {
            return Err(InvariantViolation::SumMismatch {
                node: keys,
                stored: node.sum,
                actual: right.width,
            });
        }
        // Strict separation: the left subtree must end at least two below
        // this interval, the right subtree start at least two above.
        if let Some(highest) = left.highest {
            if highest.1 + 1 >= node.left_key {
                return Err(InvariantViolation::OrderViolation {
                    node: keys,
                    neighbor: highest,
                });
            }
        }
        if let Some(lowest) = right.lowest {
            if node.right_key + 1 >= lowest.0 {
                return Err(InvariantViolation::OrderViolation {
                    node: keys,
                    neighbor: lowest,
                });
            }
        }

        let own_black = if node.color == Color::Black { 1 } else { 0 };
        Ok(SubtreeFacts {
            black_height: left.black_height + own_black,
            width: left.width + node.width() + right.width,
            lowest: left.lowest.or(Some(keys)),
            highest: right.highest.or(Some(keys)),
        })
    }
}
