use proptest::prelude::*;
use rankboard::engine::Leaderboard;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

proptest! {
    #[test]
    fn ranking_matches_reference_model(updates in update_feed()) {
        let board = Leaderboard::with_shards(4);
        let mut model: BTreeMap<i64, Decimal> = BTreeMap::new();

        for (id, delta) in updates {
            let got = board.apply_delta(id, delta).unwrap();
            let entry = model.entry(id).or_insert(Decimal::ZERO);
            *entry += delta;
            prop_assert_eq!(got, *entry);
        }

        let view = board.current_view();
        view.assert_invariants();

        let mut expect: Vec<(i64, Decimal)> = model
            .iter()
            .filter(|(_, score)| **score > Decimal::ZERO)
            .map(|(&id, &score)| (id, score))
            .collect();
        expect.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let got = board.range(1, i64::MAX).unwrap();
        prop_assert_eq!(got.len(), expect.len());
        for (i, (e, g)) in expect.iter().zip(got.iter()).enumerate() {
            prop_assert_eq!(g.customer_id, e.0);
            prop_assert_eq!(g.score, e.1);
            prop_assert_eq!(g.rank as usize, i + 1);
        }

        for g in &got {
            let w = board.neighbors(g.customer_id, 0, 0).unwrap();
            prop_assert_eq!(w.len(), 1);
            prop_assert_eq!(w[0].customer_id, g.customer_id);
            prop_assert_eq!(w[0].rank, g.rank);
        }
    }

    #[test]
    fn neighbor_windows_stay_bounded(
        updates in update_feed(),
        probe in 1i64..40,
        high in 0i64..6,
        low in 0i64..6,
    ) {
        let board = Leaderboard::with_shards(4);
        for (id, delta) in updates {
            board.apply_delta(id, delta).unwrap();
        }

        let w = board.neighbors(probe, high, low).unwrap();
        prop_assert!(w.len() <= (1 + high + low) as usize);
        for pair in w.windows(2) {
            prop_assert!(pair[0].rank < pair[1].rank);
        }

        let view = board.current_view();
        match view.rank_of(probe) {
            Some(r) => {
                prop_assert!(w.iter().any(|e| e.customer_id == probe && e.rank == r));
            }
            None => prop_assert!(w.is_empty()),
        }
    }

    #[test]
    fn range_slices_are_contiguous(
        updates in update_feed(),
        start in 1i64..50,
        span in 0i64..50,
    ) {
        let board = Leaderboard::with_shards(4);
        for (id, delta) in updates {
            board.apply_delta(id, delta).unwrap();
        }

        let full = board.range(1, i64::MAX).unwrap();
        let slice = board.range(start, start + span).unwrap();

        let lo = (start - 1) as usize;
        let expect: Vec<_> = full.iter().skip(lo).take((span + 1) as usize).copied().collect();
        prop_assert_eq!(slice, expect);
    }
}

fn update_feed() -> impl Strategy<Value = Vec<(i64, Decimal)>> {
    // ids collide on purpose; deltas are hundredths spanning [-1000, 1000]
    prop::collection::vec(
        (1i64..40, -100_000i64..=100_000).prop_map(|(id, cents)| (id, Decimal::new(cents, 2))),
        1..400,
    )
}
