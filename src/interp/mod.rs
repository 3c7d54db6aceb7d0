//! Interpolation-indexed interval tree
//!
//! Adds a learned start point to the implicit tree: a per-domain linear model
//! predicts a node near the query, a short bottom-up climb proves how far up
//! the results can reach, and the ordinary top-down scan runs from there.
//!
//! Extra augmentation: outside_max_end(n) = max end over nodes outside n's
//! subtree with beg strictly below n's beg (`Pos::MIN` if none).

mod climb;
mod model;

pub use model::{regress, DomainGrid, DomainModel, ModelSummary, TRAIN_LEVELS};

use crate::interval::{max_pos, Interval, Position};
use crate::stats::{ClimbSnapshot, ClimbStats};
use crate::tree::{ImplicitTree, InvariantError, Node, Rank};

/// Weight of one climb step relative to one top-down visit in the reported cost.
///
/// A climb step may touch two extra cache lines (the `outside_min_beg` lookup).
pub const CLIMB_COST_FACTOR: usize = 3;

/// Implicit interval tree with a trained interpolation index.
#[derive(Debug, Clone)]
pub struct InterpolatedTree<T: Interval> {
    tree: ImplicitTree<T>,

    /// Parallel to the node array.
    outside_max_end: Box<[T::Pos]>,

    grid: DomainGrid,
    models: Box<[DomainModel]>,
    stats: ClimbStats,
}

impl<T: Interval> InterpolatedTree<T> {
    /// Augment a frozen tree and train `domains` models over it (at least one).
    pub fn new(tree: ImplicitTree<T>, domains: usize) -> Self {
        let outside_max_end = outside_max_end(tree.nodes());
        let grid = match (tree.nodes().first(), tree.nodes().last()) {
            (Some(first), Some(last)) => {
                DomainGrid::new(first.beg().to_f64(), last.beg().to_f64(), domains)
            }
            _ => DomainGrid::new(0.0, 0.0, domains),
        };
        let models = if tree.is_empty() {
            vec![DomainModel::NONE; grid.count()]
        } else {
            model::train(&tree, &outside_max_end, &grid)
        };

        let index = Self {
            tree,
            outside_max_end: outside_max_end.into_boxed_slice(),
            grid,
            models: models.into_boxed_slice(),
            stats: ClimbStats::new(),
        };
        debug_assert!(
            index.check_invariants().is_ok(),
            "interpolation index inconsistent after training"
        );
        index
    }

    /// Sort `items`, freeze, and train with `domains` models.
    pub fn from_items(items: Vec<T>, domains: usize) -> Self {
        Self::new(ImplicitTree::from_items(items), domains)
    }

    /// The underlying implicit tree.
    pub fn tree(&self) -> &ImplicitTree<T> {
        &self.tree
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of model domains.
    pub fn domains(&self) -> usize {
        self.grid.count()
    }

    /// Domain partition of the `beg` range.
    pub fn grid(&self) -> &DomainGrid {
        &self.grid
    }

    /// Trained models, one per domain.
    pub fn models(&self) -> &[DomainModel] {
        &self.models
    }

    /// `outside_max_end` per rank.
    pub fn outside_max_ends(&self) -> &[T::Pos] {
        &self.outside_max_end
    }

    /// Coverage summary of the trained models.
    pub fn model_summary(&self) -> ModelSummary {
        ModelSummary::from_models(&self.models)
    }

    /// Diagnostic counters accumulated by [`Self::overlap_into`].
    pub fn stats(&self) -> ClimbSnapshot {
        self.stats.snapshot()
    }

    /// Zero the diagnostic counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Start rank for a query beginning at `qbeg`, or `None` when its domain
    /// has no model.
    pub fn predict(&self, qbeg: T::Pos) -> Option<Rank> {
        let model = self.models.get(self.grid.which(qbeg))?;
        let level = model.level?;
        model::interpolate(
            self.tree.shape(),
            level,
            model.intercept,
            model.slope,
            qbeg.to_f64(),
        )
    }

    /// Items overlapping `[qbeg, qend)`.
    pub fn overlap(&self, qbeg: T::Pos, qend: T::Pos) -> Vec<&T> {
        let mut out = Vec::new();
        self.overlap_into(qbeg, qend, &mut out);
        out
    }

    /// Clear `out`, fill it with items overlapping `[qbeg, qend)`, and return
    /// the query cost: nodes scanned plus [`CLIMB_COST_FACTOR`] per climb step.
    pub fn overlap_into<'a>(&'a self, qbeg: T::Pos, qend: T::Pos, out: &mut Vec<&'a T>) -> usize {
        let Some(start) = self.predict(qbeg) else {
            self.stats.record_fallback();
            return self.tree.overlap_into(qbeg, qend, out);
        };

        let outcome = climb::climb(
            self.tree.nodes(),
            &self.outside_max_end,
            self.tree.shape(),
            start,
            qbeg,
            qend,
        );
        self.stats.record_climb(outcome.steps);

        out.clear();
        self.tree
            .scan_subtree(outcome.subtree, outcome.level, qbeg, qend, out)
            + CLIMB_COST_FACTOR * outcome.steps as usize
    }

    /// Verify the tree augmentation, `outside_max_end`, and model coefficients.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.tree.check_invariants()?;

        let nodes = self.tree.nodes();
        let mut prefix_max: Vec<T::Pos> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let end = prefix_max.last().map_or(node.end(), |&m| max_pos(m, node.end()));
            prefix_max.push(end);
        }
        for (idx, node) in nodes.iter().enumerate() {
            let rank = Rank(idx);
            let first = rank.leftmost_leaf(rank.level()).0;
            let smaller = nodes.partition_point(|n| n.beg() < node.beg());
            let cut = first.min(smaller);
            let expected = if cut == 0 {
                T::Pos::MIN
            } else {
                prefix_max[cut - 1]
            };
            if self.outside_max_end[idx] != expected {
                return Err(InvariantError::OutsideMaxEnd { rank: idx });
            }
        }

        for (domain, model) in self.models.iter().enumerate() {
            if model.level.is_some() && !(model.intercept.is_finite() && model.slope.is_finite()) {
                return Err(InvariantError::NonFiniteModel { domain });
            }
        }
        Ok(())
    }
}

/// One pass over the sorted array computing `outside_max_end` for every rank.
///
/// Nodes left of a subtree with beg equal to the root's are not "outside"
/// for this purpose, so the lookup stops before the root's run of equal begs.
fn outside_max_end<T: Interval>(nodes: &[Node<T>]) -> Vec<T::Pos> {
    let mut running_max_end = Vec::with_capacity(nodes.len());
    let mut run_start = Vec::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        let prev = running_max_end.last().copied();
        running_max_end.push(prev.map_or(node.end(), |m| max_pos(m, node.end())));

        let start = if idx > 0 && nodes[idx - 1].beg() == node.beg() {
            run_start[idx - 1]
        } else {
            idx
        };
        run_start.push(start);
    }

    (0..nodes.len())
        .map(|idx| {
            let rank = Rank(idx);
            let first = rank.leftmost_leaf(rank.level()).0;
            let cut = first.min(run_start[idx]);
            if cut == 0 {
                T::Pos::MIN
            } else {
                running_max_end[cut - 1]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut hits: Vec<&(u32, u32)>) -> Vec<(u32, u32)> {
        hits.sort();
        hits.into_iter().copied().collect()
    }

    #[test]
    fn outside_max_end_excludes_equal_begs() {
        let items = vec![(0u32, 50u32), (3, 4), (3, 9), (3, 5), (8, 9)];
        let index = InterpolatedTree::from_items(items, 1);
        let ome = index.outside_max_ends();
        // Sorted: (0,50) (3,4) (3,5) (3,9) (8,9). Ranks 1 and 3 cover rank 0.
        assert_eq!(ome[0], u32::MIN);
        assert_eq!(ome[1], u32::MIN);
        assert_eq!(ome[3], u32::MIN);
        // Rank 2 skips rank 1 (same beg) and sees only rank 0.
        assert_eq!(ome[2], 50);
        assert_eq!(ome[4], 50);
        assert_eq!(index.check_invariants(), Ok(()));
    }

    #[test]
    fn matches_plain_tree_on_dense_data() {
        let items: Vec<_> = (0..5_000u32).map(|i| (i * 3, i * 3 + (i % 17) + 1)).collect();
        let plain = ImplicitTree::from_items(items.clone());
        let index = InterpolatedTree::from_items(items, 32);
        assert!(index.model_summary().modelled > 0);

        for q in (0..15_100u32).step_by(97) {
            let expected = sorted(plain.overlap(q, q + 40));
            assert_eq!(sorted(index.overlap(q, q + 40)), expected, "query {q}");
        }
        let stats = index.stats();
        assert!(stats.queries > 0);
        assert!(stats.fallbacks < stats.queries);
    }

    #[test]
    fn identical_begs_never_model() {
        let items: Vec<_> = (0..500u32).map(|i| (42, 42 + i)).collect();
        let index = InterpolatedTree::from_items(items.clone(), 8);
        assert_eq!(index.model_summary().modelled, 0);
        assert_eq!(index.predict(42), None);

        let plain = ImplicitTree::from_items(items);
        let mut a = Vec::new();
        let mut b = Vec::new();
        assert_eq!(index.overlap_into(100, 120, &mut a), plain.overlap_into(100, 120, &mut b));
        assert_eq!(sorted(a), sorted(b));
        assert_eq!(index.stats().fallbacks, 1);
    }

    #[test]
    fn empty_index_answers_nothing() {
        let index: InterpolatedTree<(u32, u32)> = InterpolatedTree::from_items(Vec::new(), 0);
        assert_eq!(index.domains(), 1);
        let mut out = Vec::new();
        assert_eq!(index.overlap_into(0, 10, &mut out), 1);
        assert!(out.is_empty());
    }
}
