//! Shared helpers for integration tests

#![allow(dead_code)]

use implicit_interval_tree::Interval;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Items overlapping `[qbeg, qend)` by linear scan, sorted.
pub fn brute_force<T: Interval + Clone + Ord>(items: &[T], qbeg: T::Pos, qend: T::Pos) -> Vec<T> {
    let mut hits: Vec<T> = items
        .iter()
        .filter(|item| item.beg() < qend && item.end() > qbeg)
        .cloned()
        .collect();
    hits.sort();
    hits
}

/// Owned, sorted copy of a result set.
pub fn sorted<T: Clone + Ord>(hits: Vec<&T>) -> Vec<T> {
    let mut owned: Vec<T> = hits.into_iter().cloned().collect();
    owned.sort();
    owned
}

/// Intervals with begs spread over `[0, span)` and lengths below `max_len`.
pub fn synthetic(n: usize, span: u64, max_len: u64, seed: u64) -> Vec<(u64, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let beg = rng.gen_range(0..span.max(1));
            (beg, beg + rng.gen_range(0..max_len.max(1)))
        })
        .collect()
}
