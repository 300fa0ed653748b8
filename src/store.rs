// src/store.rs
//! Sharded customer score store.
//!
//! The primary `customer_id -> score` mapping, split across a fixed number of
//! mutex-guarded shards so that updates to distinct customers rarely contend.
//! Scores are 128-bit decimals; aggregation of many small deltas stays exact
//! to the input precision.

use hashbrown::HashMap;
use rust_decimal::Decimal;
use std::sync::Mutex;

pub type CustomerId = i64;

/// Default shard count. Tunable by the host via `with_shards`.
pub const DEFAULT_SHARDS: usize = 16;

pub struct ScoreStore {
    shards: Vec<Mutex<HashMap<CustomerId, Decimal>>>,
}

impl ScoreStore {
    pub fn new(shards: usize) -> Self {
        let n = shards.max(1);
        Self {
            shards: (0..n).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    #[inline(always)]
    fn shard_of(&self, id: CustomerId) -> usize {
        (id.unsigned_abs() as usize) % self.shards.len()
    }

    /// Insert-or-add under the owning shard lock.
    ///
    /// The read-modify-write for a single id is linearizable: the returned
    /// score reflects every delta applied to that id before this call
    /// completed. Customers are never removed, so a score driven to zero or
    /// below stays in the store and can recover on a later positive delta.
    pub fn apply_delta(&self, id: CustomerId, delta: Decimal) -> Decimal {
        let mut shard = self.shards[self.shard_of(id)].lock().unwrap();
        let score = shard.entry(id).or_insert(Decimal::ZERO);
        *score += delta;
        *score
    }

    pub fn get(&self, id: CustomerId) -> Option<Decimal> {
        self.shards[self.shard_of(id)].lock().unwrap().get(&id).copied()
    }

    /// Copy out every customer with a strictly positive score.
    ///
    /// Shard locks are taken one at a time and nothing else is locked while
    /// one is held; each customer is read exactly once with its score at that
    /// moment.
    pub fn positive_entries(&self) -> Vec<(CustomerId, Decimal)> {
        let mut out = Vec::new();
        for shard in &self.shards {
            let guard = shard.lock().unwrap();
            out.extend(
                guard
                    .iter()
                    .filter(|(_, score)| **score > Decimal::ZERO)
                    .map(|(&id, &score)| (id, score)),
            );
        }
        out
    }

    pub fn customer_count(&self) -> usize {
        self.shards.iter().map(|s| s.lock().unwrap().len()).sum()
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
