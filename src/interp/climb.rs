//! Bottom-up climb
//!
//! From a predicted start node, move toward the root until no node outside
//! the current subtree can overlap the query:
//!
//!   (i)  outside_max_end(subtree) <= qbeg   nothing outside-left reaches qbeg
//!   (ii) qend <= outside_min_beg(subtree)   nothing outside-right starts before qend
//!
//! Outside-left nodes with beg < subtree beg end by (i); every other outside
//! node begins at or after outside_min_beg, so (ii) rules them out.

use crate::interval::{Interval, Position};
use crate::tree::{Level, Node, Rank, TreeShape};

/// Minimum `beg` over nodes outside `subtree` whose `beg` is at least the
/// subtree root's, computed from array adjacency. `subtree` must be real.
#[inline]
pub(crate) fn outside_min_beg<T: Interval>(nodes: &[Node<T>], subtree: Rank, k: Level) -> T::Pos {
    let beg = nodes[subtree.0].beg();
    let first = subtree.leftmost_leaf(k).0;
    if first > 0 && nodes[first - 1].beg() == beg {
        // A node left of the subtree shares the root's beg.
        return beg;
    }
    let last = subtree.rightmost_leaf(k).0;
    if last + 1 < nodes.len() {
        nodes[last + 1].beg()
    } else {
        T::Pos::MAX
    }
}

/// Where a climb stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClimbOutcome {
    pub subtree: Rank,
    pub level: Level,
    pub steps: u32,
}

/// Climb from `start` until both sufficiency conditions hold or the root is reached.
pub(crate) fn climb<T: Interval>(
    nodes: &[Node<T>],
    outside_max_end: &[T::Pos],
    shape: &TreeShape,
    start: Rank,
    qbeg: T::Pos,
    qend: T::Pos,
) -> ClimbOutcome {
    let start_level = start.level();
    let mut subtree = start;
    let mut k = start_level;

    while let Some(parent) = shape.parent(subtree, k) {
        let settled = shape.is_real(subtree)
            && outside_max_end[subtree.0] <= qbeg
            && qend <= outside_min_beg(nodes, subtree, k);
        if settled {
            break;
        }
        subtree = parent;
        k = k.up();
    }

    ClimbOutcome {
        subtree,
        level: k,
        steps: k.0 - start_level.0,
    }
}
