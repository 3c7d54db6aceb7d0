//! Structural invariant verification
//!
//! Checks the frozen array against its definition:
//! - nodes sorted by beg
//! - inside_max_end = max end over the real part of the subtree's leaf span
//!
//! Runs as a debug assertion after every freeze; callers may also run it on
//! demand (it is O(n log n)).

use thiserror::Error;

use super::geometry::Rank;
use super::ImplicitTree;
use crate::interval::{max_pos, Interval};

/// A violated structural invariant of a frozen index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Adjacent nodes are out of `beg` order.
    #[error("node {rank} begins before its predecessor")]
    Unsorted {
        /// Rank of the offending node.
        rank: usize,
    },

    /// `inside_max_end` disagrees with the subtree it summarises.
    #[error("inside_max_end of node {rank} does not match its subtree")]
    InsideMaxEnd {
        /// Rank of the offending node.
        rank: usize,
    },

    /// `outside_max_end` disagrees with the nodes left of the subtree.
    #[error("outside_max_end of node {rank} does not match the nodes outside its subtree")]
    OutsideMaxEnd {
        /// Rank of the offending node.
        rank: usize,
    },

    /// A domain model stores a non-finite coefficient.
    #[error("model for domain {domain} has non-finite coefficients")]
    NonFiniteModel {
        /// Index of the offending domain.
        domain: usize,
    },
}

impl<T: Interval> ImplicitTree<T> {
    /// Verify sortedness and augmentation of the frozen node array.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let nodes = self.nodes();

        for (idx, pair) in nodes.windows(2).enumerate() {
            if pair[1].beg() < pair[0].beg() {
                return Err(InvariantError::Unsorted { rank: idx + 1 });
            }
        }

        for (idx, node) in nodes.iter().enumerate() {
            let rank = Rank(idx);
            let k = rank.level();
            let first = rank.leftmost_leaf(k).0;
            let last = rank.rightmost_leaf(k).0.min(nodes.len() - 1);
            let expected = nodes[first..=last]
                .iter()
                .fold(node.end(), |acc, n| max_pos(acc, n.end()));
            if node.inside_max_end != expected {
                return Err(InvariantError::InsideMaxEnd { rank: idx });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tree_is_consistent() {
        let items: Vec<_> = (0..300u64).map(|i| (i * 7 % 101, i * 7 % 101 + i % 13)).collect();
        let tree = ImplicitTree::from_items(items);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_rank() {
        let err = InvariantError::InsideMaxEnd { rank: 17 };
        assert_eq!(err.to_string(), "inside_max_end of node 17 does not match its subtree");
    }
}
