//! Augmented node record
//!
//! Node = item + inside_max_end, where inside_max_end is the largest `end`
//! anywhere in the node's subtree (itself included).

use std::cmp::Ordering;

use crate::interval::{Interval, Position};

/// One slot of the frozen node array.
#[derive(Debug, Clone)]
pub struct Node<T: Interval> {
    /// The indexed item.
    pub item: T,

    /// Max `end` over this node and its whole subtree.
    pub inside_max_end: T::Pos,
}

impl<T: Interval> Node<T> {
    /// Wrap an item; the augmentation starts at the item's own `end`.
    pub fn new(item: T) -> Self {
        let inside_max_end = item.end();
        Self {
            item,
            inside_max_end,
        }
    }

    /// Interval start of the wrapped item.
    #[inline]
    pub fn beg(&self) -> T::Pos {
        self.item.beg()
    }

    /// Interval end of the wrapped item.
    #[inline]
    pub fn end(&self) -> T::Pos {
        self.item.end()
    }
}

/// Canonical `(beg, end)` ascending comparison.
///
/// Incomparable positions (NaN) compare equal and are otherwise unsupported.
#[inline]
pub fn cmp_interval<T: Interval>(a: &T, b: &T) -> Ordering {
    cmp_pos(a.beg(), b.beg()).then_with(|| cmp_pos(a.end(), b.end()))
}

#[inline]
pub(crate) fn cmp_pos<P: Position>(a: P, b: P) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Default sort used by the builder: `beg` ascending, ties broken by `end`.
pub fn sort_by_interval<T: Interval>(items: &mut [T]) {
    items.sort_unstable_by(cmp_interval);
}
