//! Staging container for items before the single sort-and-freeze step

use crate::config::IndexConfig;
use crate::index::IntervalIndex;
use crate::interp::InterpolatedTree;
use crate::interval::Interval;
use crate::tree::{sort_by_interval, ImplicitTree};

/// In-place sort applied to staged items before freezing.
///
/// A replacement must still order primarily by `beg` ascending.
pub type SortFn<T> = fn(&mut [T]);

/// Collects items in arrival order, then sorts and freezes them once.
#[derive(Debug, Clone)]
pub struct Builder<T: Interval> {
    items: Vec<T>,
    sort: SortFn<T>,
}

impl<T: Interval> Builder<T> {
    /// Empty builder using the default `(beg, end)` order.
    pub fn new() -> Self {
        Self::with_sort(sort_by_interval::<T>)
    }

    /// Empty builder using a custom sort.
    pub fn with_sort(sort: SortFn<T>) -> Self {
        Self {
            items: Vec::new(),
            sort,
        }
    }

    /// Stage one item.
    pub fn add(&mut self, item: T) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Number of staged items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_sorted(mut self) -> Vec<T> {
        (self.sort)(&mut self.items);
        self.items
    }

    /// Sort and freeze into a plain implicit tree.
    pub fn build(self) -> ImplicitTree<T> {
        ImplicitTree::from_sorted(self.into_sorted())
    }

    /// Sort, freeze, and train an interpolation index with `domains` models.
    pub fn build_interpolated(self, domains: usize) -> InterpolatedTree<T> {
        InterpolatedTree::new(self.build(), domains)
    }

    /// Build whichever variant `config` asks for.
    pub fn build_with(self, config: &IndexConfig) -> IntervalIndex<T> {
        if config.interpolate {
            IntervalIndex::Interpolated(self.build_interpolated(config.effective_domains()))
        } else {
            IntervalIndex::Plain(self.build())
        }
    }
}

impl<T: Interval> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interval> Extend<T> for Builder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Interval> FromIterator<T> for Builder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}
