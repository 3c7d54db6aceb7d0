use implicit_interval_tree::{ImplicitTree, InterpolatedTree};
use proptest::prelude::*;

mod common;
use common::{brute_force, sorted};

fn intervals(max_beg: u32, max_len: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec(
        (0..max_beg, 0..max_len).prop_map(|(beg, len)| (beg, beg + len)),
        0..300,
    )
}

fn queries() -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec((0u32..1_200, 0u32..150), 1..40)
}

proptest! {
    #[test]
    fn plain_tree_matches_brute_force(items in intervals(1_000, 120), qs in queries()) {
        let tree = ImplicitTree::from_items(items.clone());
        prop_assert!(tree.check_invariants().is_ok());
        for (qbeg, qlen) in qs {
            let qend = qbeg + qlen;
            prop_assert_eq!(sorted(tree.overlap(qbeg, qend)), brute_force(&items, qbeg, qend));
        }
    }

    #[test]
    fn climbing_matches_plain_scan(
        items in intervals(1_000, 120),
        qs in queries(),
        domains in 0usize..40,
    ) {
        let plain = ImplicitTree::from_items(items.clone());
        let index = InterpolatedTree::from_items(items.clone(), domains);
        prop_assert!(index.check_invariants().is_ok());
        for (qbeg, qlen) in qs {
            let qend = qbeg + qlen;
            let expected = brute_force(&items, qbeg, qend);
            prop_assert_eq!(sorted(plain.overlap(qbeg, qend)), expected.clone());
            prop_assert_eq!(sorted(index.overlap(qbeg, qend)), expected);
        }
    }

    #[test]
    fn heavy_beg_ties_keep_climb_sound(
        items in intervals(6, 40),
        qs in proptest::collection::vec((0u32..50, 0u32..10), 1..40),
        domains in 1usize..8,
    ) {
        let index = InterpolatedTree::from_items(items.clone(), domains);
        for (qbeg, qlen) in qs {
            let qend = qbeg + qlen;
            prop_assert_eq!(sorted(index.overlap(qbeg, qend)), brute_force(&items, qbeg, qend));
        }
    }

    #[test]
    fn float_positions_match_brute_force(
        raw in proptest::collection::vec((0.0f64..500.0, 0.0f64..30.0), 0..200),
        qs in proptest::collection::vec((0.0f64..550.0, 0.0f64..40.0), 1..20),
        domains in 1usize..16,
    ) {
        let items: Vec<(f64, f64)> = raw.iter().map(|&(b, l)| (b, b + l)).collect();
        let index = InterpolatedTree::from_items(items.clone(), domains);
        for (qbeg, qlen) in qs {
            let qend = qbeg + qlen;
            let mut expected: Vec<(f64, f64)> = items
                .iter()
                .copied()
                .filter(|&(b, e)| b < qend && e > qbeg)
                .collect();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut got: Vec<(f64, f64)> = index.overlap(qbeg, qend).into_iter().copied().collect();
            got.sort_by(|a, b| a.partial_cmp(b).unwrap());
            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn cost_bounds_hold(items in intervals(1_000, 120), qs in queries()) {
        let tree = ImplicitTree::from_items(items.clone());
        let mut out = Vec::new();
        for (qbeg, qlen) in qs {
            let cost = tree.overlap_into(qbeg, qbeg + qlen, &mut out);
            prop_assert!(cost >= 1);
            prop_assert!(cost >= out.len());
        }
    }
}
