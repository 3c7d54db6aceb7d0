//! One query surface over both index variants

use crate::interp::InterpolatedTree;
use crate::interval::Interval;
use crate::stats::ClimbSnapshot;
use crate::tree::{ImplicitTree, InvariantError};

/// A frozen interval index, either plain or interpolation-indexed.
#[derive(Debug, Clone)]
pub enum IntervalIndex<T: Interval> {
    /// Top-down queries from the root.
    Plain(ImplicitTree<T>),
    /// Predicted start, bottom-up climb, then top-down scan.
    Interpolated(InterpolatedTree<T>),
}

impl<T: Interval> IntervalIndex<T> {
    /// Items overlapping `[qbeg, qend)`, in scan order.
    pub fn overlap(&self, qbeg: T::Pos, qend: T::Pos) -> Vec<&T> {
        match self {
            Self::Plain(tree) => tree.overlap(qbeg, qend),
            Self::Interpolated(index) => index.overlap(qbeg, qend),
        }
    }

    /// Clear `out`, fill it with items overlapping `[qbeg, qend)`, and return
    /// the query cost.
    pub fn overlap_into<'a>(&'a self, qbeg: T::Pos, qend: T::Pos, out: &mut Vec<&'a T>) -> usize {
        match self {
            Self::Plain(tree) => tree.overlap_into(qbeg, qend, out),
            Self::Interpolated(index) => index.overlap_into(qbeg, qend, out),
        }
    }

    /// The underlying implicit tree.
    pub fn tree(&self) -> &ImplicitTree<T> {
        match self {
            Self::Plain(tree) => tree,
            Self::Interpolated(index) => index.tree(),
        }
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.tree().len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.tree().is_empty()
    }

    /// Items in `(beg, end)` order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.tree().items()
    }

    /// Whether queries use the interpolation index.
    pub fn is_interpolated(&self) -> bool {
        matches!(self, Self::Interpolated(_))
    }

    /// Climb counters, for the interpolated variant only.
    pub fn stats(&self) -> Option<ClimbSnapshot> {
        match self {
            Self::Plain(_) => None,
            Self::Interpolated(index) => Some(index.stats()),
        }
    }

    /// Verify every structural invariant of the frozen index.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            Self::Plain(tree) => tree.check_invariants(),
            Self::Interpolated(index) => index.check_invariants(),
        }
    }
}

impl<T: Interval> From<ImplicitTree<T>> for IntervalIndex<T> {
    fn from(tree: ImplicitTree<T>) -> Self {
        Self::Plain(tree)
    }
}

impl<T: Interval> From<InterpolatedTree<T>> for IntervalIndex<T> {
    fn from(index: InterpolatedTree<T>) -> Self {
        Self::Interpolated(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_agree() {
        let items: Vec<_> = (0..1_000u64).map(|i| (i * 5 % 997, i * 5 % 997 + 30)).collect();
        let plain: IntervalIndex<_> = ImplicitTree::from_items(items.clone()).into();
        let interp: IntervalIndex<_> = InterpolatedTree::from_items(items, 16).into();

        for q in (0..1_100u64).step_by(13) {
            let mut a: Vec<_> = plain.overlap(q, q + 7).into_iter().copied().collect();
            let mut b: Vec<_> = interp.overlap(q, q + 7).into_iter().copied().collect();
            a.sort();
            b.sort();
            assert_eq!(a, b, "query {q}");
        }
        assert!(plain.stats().is_none());
        assert_eq!(interp.stats().map(|s| s.queries), Some(85));
    }
}
