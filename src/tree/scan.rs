//! Top-down overlap scan
//!
//! Pruned descent from a subtree root. Recursion depth is bounded by the
//! tree height (O(log n)).

use super::geometry::{Level, Rank};
use super::node::Node;
use crate::interval::Interval;

/// Subtrees at or below this level are scanned linearly over their leaf span.
const LINEAR_SCAN_LEVEL: Level = Level(2);

/// Collect every node under `subtree` overlapping `[qbeg, qend)` into `out`.
///
/// Returns the number of nodes visited.
pub(crate) fn scan<'a, T: Interval>(
    nodes: &'a [Node<T>],
    subtree: Rank,
    k: Level,
    qbeg: T::Pos,
    qend: T::Pos,
    out: &mut Vec<&'a T>,
) -> usize {
    debug_assert_eq!(k, subtree.level());

    if subtree.0 >= nodes.len() {
        // Imaginary: the right subtree is imaginary too, only the left can hold items.
        return 1 + match subtree.left(k) {
            Some(left) => scan(nodes, left, Level(k.0 - 1), qbeg, qend, out),
            None => 0,
        };
    }

    if k <= LINEAR_SCAN_LEVEL {
        let first = subtree.leftmost_leaf(k).0;
        let last = subtree.rightmost_leaf(k).0.min(nodes.len() - 1);
        let mut visited = 0;
        for node in &nodes[first..=last] {
            visited += 1;
            if node.beg() >= qend {
                break;
            }
            if node.end() > qbeg {
                out.push(&node.item);
            }
        }
        return visited;
    }

    let mut cost = 1;
    let node = &nodes[subtree.0];
    if node.inside_max_end > qbeg {
        let child = Level(k.0 - 1);
        cost += scan(nodes, Rank(subtree.0 - child.span()), child, qbeg, qend, out);
        if node.beg() < qend {
            if node.end() > qbeg {
                out.push(&node.item);
            }
            cost += scan(nodes, Rank(subtree.0 + child.span()), child, qbeg, qend, out);
        }
    }
    cost
}
