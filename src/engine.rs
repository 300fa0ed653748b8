// src/engine.rs
//! Validating facade over the store, cache, and view.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::cache::ViewCache;
use crate::error::RankError;
use crate::store::{CustomerId, ScoreStore, DEFAULT_SHARDS};
use crate::view::{RankedCustomer, RankingView};

pub struct Leaderboard {
    store: ScoreStore,
    cache: ViewCache,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    pub fn with_shards(shards: usize) -> Self {
        Self {
            store: ScoreStore::new(shards),
            cache: ViewCache::new(),
        }
    }

    /// Adjust a customer's score by a signed delta and return the new score.
    ///
    /// Rejects non-positive ids and deltas outside [-1000, 1000] before any
    /// mutation. On success the published view is marked stale.
    pub fn apply_delta(&self, customer_id: CustomerId, delta: Decimal) -> Result<Decimal, RankError> {
        if customer_id <= 0 {
            return Err(RankError::BadArgument("customer id must be positive"));
        }
        if delta.abs() > Decimal::ONE_THOUSAND {
            return Err(RankError::OutOfRange(delta));
        }

        let score = self.store.apply_delta(customer_id, delta);
        self.cache.note_update();
        Ok(score)
    }

    /// Ranked customers with `start <= rank <= end`, ascending. Ends past the
    /// board clamp; a start beyond the last rank yields an empty list.
    pub fn range(&self, start: i64, end: i64) -> Result<Vec<RankedCustomer>, RankError> {
        if start < 1 {
            return Err(RankError::BadArgument("start rank must be >= 1"));
        }
        if end < start {
            return Err(RankError::BadArgument("end rank must be >= start"));
        }

        let view = self.cache.get_view(&self.store);
        Ok(view.range(start as usize, end as usize).to_vec())
    }

    /// Window around `customer_id`: up to `high` better-ranked neighbors and
    /// `low` worse-ranked neighbors, the target included. Unranked ids yield
    /// an empty list.
    pub fn neighbors(
        &self,
        customer_id: CustomerId,
        high: i64,
        low: i64,
    ) -> Result<Vec<RankedCustomer>, RankError> {
        if high < 0 || low < 0 {
            return Err(RankError::BadArgument("neighbor counts must be non-negative"));
        }

        let view = self.cache.get_view(&self.store);
        Ok(view.window(customer_id, high as usize, low as usize).to_vec())
    }

    /// Fresh view handle; rebuilds first if updates have landed since the
    /// last publication.
    pub fn current_view(&self) -> Arc<RankingView> {
        self.cache.get_view(&self.store)
    }

    /// Raw stored score, including customers hidden from the ranking.
    pub fn score_of(&self, customer_id: CustomerId) -> Option<Decimal> {
        self.store.get(customer_id)
    }

    pub fn customer_count(&self) -> usize {
        self.store.customer_count()
    }

    pub fn shard_count(&self) -> usize {
        self.store.shard_count()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
