// src/cache.rs
//! View coherence protocol.
//!
//! [`ViewCache`] keeps the published [`RankingView`] consistent with the
//! score store under concurrency. Writers flip an atomic dirty flag after
//! every successful delta; readers rebuild lazily, at most one rebuild in
//! flight. The published view is an `Arc` snapshot cloned under a brief read
//! lock, so queries against an already-acquired view take no locks at all.
//!
//! Lock order: the rebuild mutex is taken first, shard locks are taken (one
//! at a time) during the store scan, and the publish write lock is taken only
//! after every shard lock has been released. Writers never hold a shard lock
//! while touching the flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::store::ScoreStore;
use crate::view::RankingView;

pub struct ViewCache {
    dirty: AtomicBool,
    rebuild: Mutex<()>,
    published: RwLock<Arc<RankingView>>,
    rebuilds: AtomicU64,
}

impl ViewCache {
    pub fn new() -> Self {
        Self {
            dirty: AtomicBool::new(false),
            rebuild: Mutex::new(()),
            published: RwLock::new(Arc::new(RankingView::empty())),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// Mark the published view stale. Called after every successful delta;
    /// never blocks on the rebuild path.
    #[inline]
    pub fn note_update(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Return a view reflecting at least every update completed before this
    /// call began.
    ///
    /// Fast path: flag clear, clone the published `Arc`. Slow path: take the
    /// rebuild mutex, re-check the flag, rebuild from the store, publish.
    pub fn get_view(&self, store: &ScoreStore) -> Arc<RankingView> {
        if !self.dirty.load(Ordering::Acquire) {
            return Arc::clone(&self.published.read().unwrap());
        }

        let _rebuild = self.rebuild.lock().unwrap();
        if !self.dirty.swap(false, Ordering::AcqRel) {
            // Lost the race: the previous holder already republished.
            return Arc::clone(&self.published.read().unwrap());
        }

        // Flag cleared before the scan: a delta landing mid-rebuild re-marks
        // the view stale instead of being silently absorbed.
        let view = Arc::new(RankingView::build(store.positive_entries()));
        *self.published.write().unwrap() = Arc::clone(&view);
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        view
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new()
    }
}
