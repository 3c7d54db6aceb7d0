//! Per-domain rank prediction models
//!
//! The `[min_beg, max_beg]` range is cut into `C` equal-width domains. Each
//! domain stores a level `k` and a linear fit
//!
//!   level_rank(beg) ≈ intercept + slope · beg
//!
//! over the nodes of that level whose `beg` falls in the domain. A query
//! jumps to `Rank::from_level_rank(k, level_rank(qbeg))` and climbs from there.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::interval::{Interval, Position};
use crate::tree::{ImplicitTree, Level, Rank, TreeShape};

/// Fibonacci-like series of candidate levels evaluated per domain.
pub const TRAIN_LEVELS: [u32; 9] = [0, 1, 2, 4, 7, 12, 20, 33, 54];

/// Linear model for one domain; `level == None` means "no prediction".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct DomainModel {
    /// Level the prediction lands on.
    pub level: Option<Level>,
    /// Regression intercept (level-rank units).
    pub intercept: f64,
    /// Regression slope (level-rank per position unit).
    pub slope: f64,
    /// Estimated mean query cost that won the level selection.
    pub expected_cost: f64,
}

impl DomainModel {
    /// Domain without a usable model; queries fall back to a full scan.
    pub const NONE: DomainModel = DomainModel {
        level: None,
        intercept: 0.0,
        slope: 0.0,
        expected_cost: f64::INFINITY,
    };
}

/// Equal-width partition of the `beg` range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct DomainGrid {
    min_beg: f64,
    width: f64,
    count: usize,
}

impl DomainGrid {
    /// Partition `[min_beg, max_beg]` into `count` domains (at least one).
    pub fn new(min_beg: f64, max_beg: f64, count: usize) -> Self {
        let count = count.max(1);
        Self {
            min_beg,
            width: (max_beg - min_beg) / count as f64,
            count,
        }
    }

    /// Number of domains.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Domain owning position `beg`, clamped to `[0, count)`.
    #[inline]
    pub fn which<P: Position>(&self, beg: P) -> usize {
        let x = beg.to_f64();
        if !(x > self.min_beg) || !(self.width > 0.0) {
            return 0;
        }
        (((x - self.min_beg) / self.width) as usize).min(self.count - 1)
    }
}

/// Ordinary least squares of `y` on `x`, returning `(intercept, slope)`.
///
/// `None` for fewer than two points or zero variance in `x`.
pub fn regress(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() <= 1 {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (cov, var) = points.iter().fold((0.0, 0.0), |(cov, var), &(x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });
    if var == 0.0 {
        return None;
    }
    let slope = cov / var;
    Some((mean_y - slope * mean_x, slope))
}

/// Rank to start climbing from for position `x` under the given fit.
///
/// Predictions past the real nodes clamp to the rightmost real leaf; `None`
/// only for an empty tree.
#[inline]
pub(crate) fn interpolate(
    shape: &TreeShape,
    k: Level,
    intercept: f64,
    slope: f64,
    x: f64,
) -> Option<Rank> {
    let ofs = intercept + slope * x;
    debug_assert!(ofs.is_finite(), "non-finite interpolation at {x}");
    let level_rank = ofs.round().max(0.0) as usize;
    match Rank::from_level_rank(k, level_rank) {
        Some(rank) if shape.is_real(rank) => Some(rank),
        _ => shape.rightmost_real_leaf(),
    }
}

/// Fit one model per domain over a frozen tree.
pub(crate) fn train<T: Interval>(
    tree: &ImplicitTree<T>,
    outside_max_end: &[T::Pos],
    grid: &DomainGrid,
) -> Vec<DomainModel> {
    let nodes = tree.nodes();
    let shape = tree.shape();
    let root_level = shape.root_level().0;

    let mut points: Vec<Vec<(T::Pos, Rank)>> = vec![Vec::new(); grid.count()];
    for (idx, node) in nodes.iter().enumerate() {
        points[grid.which(node.beg())].push((node.beg(), Rank(idx)));
    }

    let mut models = vec![DomainModel::NONE; grid.count()];
    for (domain, domain_points) in points.iter().enumerate() {
        let mut by_level: Vec<Vec<(f64, f64)>> = vec![Vec::new(); root_level as usize + 1];
        for &(beg, rank) in domain_points {
            by_level[rank.level().0 as usize].push((beg.to_f64(), rank.level_rank() as f64));
        }

        let mut lowest_cost = f64::MAX;
        for k in TRAIN_LEVELS {
            if k >= root_level || by_level[k as usize].len() <= 1 {
                break;
            }
            let level = Level(k);
            let Some((intercept, slope)) =
                regress(&by_level[k as usize]).filter(|&(_, slope)| slope != 0.0)
            else {
                continue;
            };

            let mut cost = 0usize;
            for &(beg, actual) in domain_points {
                let Some(predicted) = interpolate(shape, level, intercept, slope, beg.to_f64())
                else {
                    continue;
                };
                let error = predicted.0.abs_diff(actual.0) >> k;
                let error_penalty = if error > 0 {
                    2 * (1 + error.ilog2() as usize)
                } else {
                    0
                };
                let overlap_penalty = if outside_max_end[predicted.0] > beg {
                    1 + (root_level - k) as usize / 2
                } else {
                    0
                };
                cost += k as usize + error_penalty.max(overlap_penalty);
            }

            let avg_cost = cost as f64 / domain_points.len() as f64;
            if avg_cost < root_level as f64 && avg_cost < lowest_cost {
                lowest_cost = avg_cost;
                models[domain] = DomainModel {
                    level: Some(level),
                    intercept,
                    slope,
                    expected_cost: avg_cost,
                };
            }
        }

        trace!(
            domain,
            points = domain_points.len(),
            level = models[domain].level.map(|l| l.0),
            expected_cost = models[domain].expected_cost,
            "trained domain model"
        );
    }

    debug!(
        domains = grid.count(),
        modelled = models.iter().filter(|m| m.level.is_some()).count(),
        "trained interpolation index"
    );
    models
}

/// Coverage of the trained models.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ModelSummary {
    /// Total number of domains.
    pub domains: usize,
    /// Domains with a usable model.
    pub modelled: usize,
    /// Histogram of chosen levels.
    pub levels: BTreeMap<u32, usize>,
}

impl ModelSummary {
    pub(crate) fn from_models(models: &[DomainModel]) -> Self {
        let mut levels = BTreeMap::new();
        for level in models.iter().filter_map(|m| m.level) {
            *levels.entry(level.0).or_insert(0) += 1;
        }
        Self {
            domains: models.len(),
            modelled: levels.values().sum(),
            levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regress_recovers_exact_line() {
        let points: Vec<_> = (0..10).map(|x| (x as f64, 3.0 + 0.5 * x as f64)).collect();
        let (intercept, slope) = regress(&points).unwrap();
        assert!((intercept - 3.0).abs() < 1e-9);
        assert!((slope - 0.5).abs() < 1e-9);
    }

    #[test]
    fn regress_skips_degenerate_fits() {
        assert_eq!(regress(&[]), None);
        assert_eq!(regress(&[(1.0, 2.0)]), None);
        assert_eq!(regress(&[(4.0, 1.0), (4.0, 9.0), (4.0, 3.0)]), None);
    }

    #[test]
    fn grid_clamps_to_range() {
        let grid = DomainGrid::new(100.0, 200.0, 4);
        assert_eq!(grid.which(50u32), 0);
        assert_eq!(grid.which(100u32), 0);
        assert_eq!(grid.which(124u32), 0);
        assert_eq!(grid.which(125u32), 1);
        assert_eq!(grid.which(199u32), 3);
        assert_eq!(grid.which(200u32), 3);
        assert_eq!(grid.which(10_000u32), 3);
    }

    #[test]
    fn grid_with_single_position_uses_domain_zero() {
        let grid = DomainGrid::new(7.0, 7.0, 16);
        assert_eq!(grid.which(7u32), 0);
        assert_eq!(grid.which(9u32), 0);
    }

    #[test]
    fn zero_domains_clamp_to_one() {
        assert_eq!(DomainGrid::new(0.0, 10.0, 0).count(), 1);
    }

    #[test]
    fn interpolate_clamps_past_real_nodes() {
        let shape = TreeShape::new(10);
        assert_eq!(interpolate(&shape, Level(0), 0.0, 1.0, 2.0), Some(Rank(4)));
        assert_eq!(interpolate(&shape, Level(0), 0.0, 1.0, -5.0), Some(Rank(0)));
        assert_eq!(interpolate(&shape, Level(1), 0.0, 1.0, 1e9), Some(Rank(8)));
        assert_eq!(interpolate(&TreeShape::new(0), Level(0), 0.0, 1.0, 1.0), None);
    }

    #[test]
    fn summary_counts_levels() {
        let mut models = vec![DomainModel::NONE; 4];
        models[1].level = Some(Level(2));
        models[3].level = Some(Level(2));
        let summary = ModelSummary::from_models(&models);
        assert_eq!(summary.domains, 4);
        assert_eq!(summary.modelled, 2);
        assert_eq!(summary.levels.get(&2), Some(&2));
    }
}
