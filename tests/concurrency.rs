// tests/concurrency.rs
use rankboard::engine::Leaderboard;
use rust_decimal::Decimal;
use std::sync::mpsc;
use std::thread;

#[test]
fn same_customer_deltas_are_never_lost() {
    let board = Leaderboard::with_shards(8);
    let threads = 8i64;
    let per_thread = 1_000i64;

    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                for _ in 0..per_thread {
                    board.apply_delta(7, Decimal::ONE).unwrap();
                }
            });
        }
    });

    let expected = Decimal::from(threads * per_thread);
    assert_eq!(board.score_of(7), Some(expected));

    let top = board.range(1, 1).unwrap();
    assert_eq!(top[0].customer_id, 7);
    assert_eq!(top[0].score, expected);
}

#[test]
fn distinct_customers_update_in_parallel() {
    let board = Leaderboard::with_shards(8);
    let writers = 4i64;
    let per_id = 50i64;

    thread::scope(|s| {
        for _ in 0..writers {
            s.spawn(|| {
                for id in 1..=16i64 {
                    for _ in 0..per_id {
                        board.apply_delta(id, Decimal::from(id)).unwrap();
                    }
                }
            });
        }
    });

    let view = board.current_view();
    view.assert_invariants();
    assert_eq!(view.len(), 16);
    for id in 1..=16i64 {
        assert_eq!(board.score_of(id), Some(Decimal::from(id * writers * per_id)));
    }
    assert_eq!(view.entries()[0].customer_id, 16);
}

#[test]
fn views_stay_consistent_under_mixed_load() {
    let board = Leaderboard::with_shards(4);

    thread::scope(|s| {
        for t in 0..4i64 {
            let board = &board;
            s.spawn(move || {
                for i in 0..500i64 {
                    let id = 1 + (i * 7 + t) % 40;
                    // deltas swing negative so customers drop in and out
                    let delta = Decimal::from((i % 21) - 10);
                    board.apply_delta(id, delta).unwrap();
                }
            });
        }
        for _ in 0..2 {
            let board = &board;
            s.spawn(move || {
                for _ in 0..200 {
                    board.current_view().assert_invariants();
                }
            });
        }
    });

    board.current_view().assert_invariants();
}

#[test]
fn queries_begun_after_an_update_see_it() {
    let board = Leaderboard::new();
    let (tx, rx) = mpsc::channel::<Decimal>();

    thread::scope(|s| {
        let board_ref = &board;
        s.spawn(move || {
            let mut total = Decimal::ZERO;
            for _ in 0..200 {
                total += Decimal::ONE;
                board_ref.apply_delta(3, Decimal::ONE).unwrap();
                tx.send(total).unwrap();
            }
        });

        for total in rx {
            // the send happened after apply_delta returned, so the view must
            // already hold at least this much
            let w = board.neighbors(3, 0, 0).unwrap();
            assert_eq!(w.len(), 1);
            assert!(w[0].score >= total);
        }
    });
}
