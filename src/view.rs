// src/view.rs
//! Immutable ranking snapshots.
//!
//! A [`RankingView`] is a totally-ordered snapshot of the customers whose
//! score is strictly positive: score descending, customer id ascending on
//! ties, ranks assigned densely from 1. Views are built as a whole and never
//! mutated after publication; queries slice a single view and therefore never
//! observe torn state.
//!
//! ## Example
//!
//! ```rust
//! use rankboard::view::RankingView;
//! use rust_decimal::Decimal;
//!
//! let view = RankingView::build(vec![
//!     (1, Decimal::from(100)),
//!     (2, Decimal::from(200)),
//!     (3, Decimal::from(200)),
//! ]);
//!
//! // tie on 200 breaks toward the lower id
//! assert_eq!(view.entries()[0].customer_id, 2);
//! assert_eq!(view.entries()[1].customer_id, 3);
//! assert_eq!(view.rank_of(1), Some(3));
//! ```

use hashbrown::HashMap;
use rust_decimal::Decimal;

use crate::store::CustomerId;

/// Read-only projection of one customer at its position in the ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedCustomer {
    pub customer_id: CustomerId,
    pub score: Decimal,
    pub rank: u32,
}

#[derive(Default)]
pub struct RankingView {
    entries: Vec<RankedCustomer>,
    positions: HashMap<CustomerId, usize>,
}

impl RankingView {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Order eligible customers by (score desc, id asc) and assign dense
    /// 1-based ranks. Callers pass only positive-score entries.
    pub fn build(mut live: Vec<(CustomerId, Decimal)>) -> Self {
        live.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut entries = Vec::with_capacity(live.len());
        let mut positions = HashMap::with_capacity(live.len());
        for (i, (id, score)) in live.into_iter().enumerate() {
            entries.push(RankedCustomer {
                customer_id: id,
                score,
                rank: (i + 1) as u32,
            });
            positions.insert(id, i);
        }

        Self { entries, positions }
    }

    #[inline]
    pub fn entries(&self) -> &[RankedCustomer] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn rank_of(&self, id: CustomerId) -> Option<u32> {
        self.positions.get(&id).map(|&i| (i + 1) as u32)
    }

    /// Ranks `start..=end`, 1-based. Ends past the board clamp silently; a
    /// start beyond the last rank yields an empty slice. Callers validate
    /// `start >= 1` and `end >= start`.
    pub fn range(&self, start: usize, end: usize) -> &[RankedCustomer] {
        debug_assert!(start >= 1 && end >= start);
        let lo = start - 1;
        if lo >= self.entries.len() {
            return &[];
        }
        let hi = end.min(self.entries.len());
        &self.entries[lo..hi]
    }

    /// Contiguous window around `id`: up to `better` superior ranks before it
    /// and `worse` inferior ranks after it, the target always included.
    /// Unranked ids yield an empty slice.
    pub fn window(&self, id: CustomerId, better: usize, worse: usize) -> &[RankedCustomer] {
        let Some(&pos) = self.positions.get(&id) else {
            return &[];
        };
        let lo = pos.saturating_sub(better);
        let hi = pos
            .saturating_add(worse)
            .saturating_add(1)
            .min(self.entries.len());
        &self.entries[lo..hi]
    }
}

impl RankingView {
    pub fn assert_invariants(&self) {
        // 1) strict (score desc, id asc) total order
        for w in self.entries.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            assert!(
                a.score > b.score || (a.score == b.score && a.customer_id < b.customer_id),
                "order violation at ranks {} and {}",
                a.rank,
                b.rank
            );
        }

        // 2) only positive scores are visible
        assert!(
            self.entries.iter().all(|e| e.score > Decimal::ZERO),
            "non-positive score in view"
        );

        // 3) ranks are exactly 1..=len with no gaps
        for (i, e) in self.entries.iter().enumerate() {
            assert_eq!(e.rank as usize, i + 1, "rank gap at position {i}");
        }

        // 4) position index agrees with the sequence
        assert_eq!(self.positions.len(), self.entries.len(), "index size mismatch");
        for (&id, &pos) in self.positions.iter() {
            assert_eq!(self.entries[pos].customer_id, id, "index points at wrong entry");
        }
    }
}
