//! Implicit augmented interval tree
//!
//! Key idea: no explicit tree is stored. The frozen, `(beg, end)`-sorted node
//! array *is* the tree; parents and children are derived from ranks by bit
//! arithmetic (see [`geometry`]). Each node carries `inside_max_end`, which
//! lets a top-down scan skip whole subtrees that end before the query.

mod check;
pub mod geometry;
mod node;
pub(crate) mod scan;

pub use check::InvariantError;
pub use geometry::{Level, Rank, TreeShape};
pub use node::{cmp_interval, sort_by_interval, Node};

use tracing::debug;

use crate::interval::{max_pos, Interval};

/// Immutable interval tree over a sorted node array.
#[derive(Debug, Clone)]
pub struct ImplicitTree<T: Interval> {
    /// Nodes sorted by `(beg, end)`.
    nodes: Box<[Node<T>]>,

    /// Implied complete-tree geometry.
    shape: TreeShape,
}

impl<T: Interval> ImplicitTree<T> {
    /// Sort `items` with the default order and freeze them into a tree.
    pub fn from_items(mut items: Vec<T>) -> Self {
        sort_by_interval(&mut items);
        Self::from_sorted(items)
    }

    /// Freeze items that are already sorted by `beg` ascending.
    ///
    /// Only debug builds verify the ordering.
    pub fn from_sorted(items: Vec<T>) -> Self {
        let shape = TreeShape::new(items.len());
        let mut nodes: Vec<Node<T>> = items.into_iter().map(Node::new).collect();
        debug_assert!(
            nodes.windows(2).all(|w| w[0].beg() <= w[1].beg()),
            "nodes must be sorted by beg"
        );

        augment(&mut nodes, &shape);

        debug!(
            nodes = shape.len(),
            root_level = shape.root_level().0,
            full_size = shape.full_size(),
            "froze implicit interval tree"
        );

        let tree = Self {
            nodes: nodes.into_boxed_slice(),
            shape,
        };
        debug_assert!(
            tree.check_invariants().is_ok(),
            "augmentation inconsistent after freeze"
        );
        tree
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Tree geometry.
    pub fn shape(&self) -> &TreeShape {
        &self.shape
    }

    /// Frozen node array in sorted order.
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Items in `(beg, end)` order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.nodes.iter().map(|node| &node.item)
    }

    /// Items overlapping `[qbeg, qend)`.
    ///
    /// Results follow scan order, not necessarily sorted order.
    pub fn overlap(&self, qbeg: T::Pos, qend: T::Pos) -> Vec<&T> {
        let mut out = Vec::new();
        self.overlap_into(qbeg, qend, &mut out);
        out
    }

    /// Clear `out`, fill it with items overlapping `[qbeg, qend)`, and return
    /// the number of nodes visited.
    pub fn overlap_into<'a>(&'a self, qbeg: T::Pos, qend: T::Pos, out: &mut Vec<&'a T>) -> usize {
        out.clear();
        self.scan_subtree(self.shape.root(), self.shape.root_level(), qbeg, qend, out)
    }

    /// Top-down scan restricted to one subtree, appending to `out`.
    pub(crate) fn scan_subtree<'a>(
        &'a self,
        subtree: Rank,
        k: Level,
        qbeg: T::Pos,
        qend: T::Pos,
        out: &mut Vec<&'a T>,
    ) -> usize {
        scan::scan(&self.nodes, subtree, k, qbeg, qend, out)
    }
}

impl<T: Interval> FromIterator<T> for ImplicitTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}

/// Fill `inside_max_end` bottom-up, one level at a time.
///
/// A missing right child is replaced by the running value along the right
/// border path, which is exactly the max over the real part of that subtree.
fn augment<T: Interval>(nodes: &mut [Node<T>], shape: &TreeShape) {
    let border = shape.right_border();
    let Some(&leaf) = border.first() else {
        return;
    };
    let mut border_ime = nodes[leaf.0].inside_max_end;

    for k in 1..=shape.root_level().0 {
        let level = Level(k);
        let half = 1usize << (k - 1);
        let step = half << 2;
        let mut n = (half << 1) - 1;
        while n < nodes.len() {
            let rank = Rank(n);
            let left = rank.left(level).map_or(n, |r| r.0);
            let right = rank.right(level).map_or(n, |r| r.0);

            let mut ime = max_pos(nodes[n].end(), nodes[left].inside_max_end);
            ime = if right < nodes.len() {
                max_pos(ime, nodes[right].inside_max_end)
            } else {
                max_pos(ime, border_ime)
            };
            nodes[n].inside_max_end = ime;

            if border[k as usize] == rank {
                border_ime = ime;
            }
            n += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let tree = ImplicitTree::from_items(vec![(12, 34), (0, 23), (34, 56)]);
        let mut hits: Vec<_> = tree.overlap(22, 25).into_iter().copied().collect();
        hits.sort();
        assert_eq!(hits, vec![(0, 23), (12, 34)]);
    }

    #[test]
    fn empty_tree_costs_one_visit() {
        let tree: ImplicitTree<(u32, u32)> = ImplicitTree::from_items(Vec::new());
        let mut out = Vec::new();
        assert_eq!(tree.overlap_into(0, 100, &mut out), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn root_augmentation_covers_border() {
        // Longest interval sits at the highest rank, reachable only through the border.
        for len in 1..64u32 {
            let mut items: Vec<_> = (0..len).map(|i| (i, i + 1)).collect();
            items[len as usize - 1].1 = 1_000;
            let tree = ImplicitTree::from_items(items);
            let root = tree.shape().root();
            assert!(tree.shape().is_real(root), "root of a non-empty tree is real");
            assert_eq!(tree.nodes()[root.0].inside_max_end, 1_000, "len {len}");
            assert!(tree.check_invariants().is_ok());
        }
    }

    #[test]
    fn items_are_sorted() {
        let tree: ImplicitTree<_> = vec![(5, 6), (1, 9), (5, 5), (0, 1)].into_iter().collect();
        let items: Vec<_> = tree.items().copied().collect();
        assert_eq!(items, vec![(0, 1), (1, 9), (5, 5), (5, 6)]);
    }
}
