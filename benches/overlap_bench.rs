//! Query throughput: top-down scan vs. predicted climb

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use implicit_interval_tree::{ImplicitTree, InterpolatedTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Skewed synthetic intervals: dense near the origin, sparse further out.
fn skewed_items(n: u64) -> Vec<(u64, u64)> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let beg = i * i / 64 + rng.gen_range(0..16u64);
            (beg, beg + 20 + rng.gen_range(0..200u64))
        })
        .collect()
}

fn benchmark_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");
    for n in [10_000u64, 1_000_000] {
        let items = skewed_items(n);
        let max_beg = items.iter().map(|&(b, _)| b).max().unwrap_or(0);
        let queries: Vec<u64> = (0..1_000u64).map(|i| i * (max_beg / 1_000 + 1)).collect();

        let plain = ImplicitTree::from_items(items.clone());
        let interp = InterpolatedTree::from_items(items, (n / 1_000) as usize);

        group.bench_with_input(BenchmarkId::new("top_down", n), &queries, |b, queries| {
            let mut out = Vec::new();
            b.iter(|| {
                for &q in queries {
                    black_box(plain.overlap_into(q, q + 50, &mut out));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("climbing", n), &queries, |b, queries| {
            let mut out = Vec::new();
            b.iter(|| {
                for &q in queries {
                    black_box(interp.overlap_into(q, q + 50, &mut out));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_overlap);
criterion_main!(benches);
