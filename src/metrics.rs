// src/metrics.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct Metrics {
    pub updates_total: AtomicU64,
    pub updates_rejected: AtomicU64,
    pub range_queries_total: AtomicU64,
    pub neighbor_queries_total: AtomicU64,
    pub queries_rejected: AtomicU64,

    // ultra-cheap latency “histogram” for the update hot path (ns buckets)
    pub upd_lat_b0: AtomicU64,
    pub upd_lat_b1: AtomicU64,
    pub upd_lat_b2: AtomicU64,
    pub upd_lat_b3: AtomicU64,
    pub upd_lat_b4: AtomicU64,

    // query buckets are wider; a query may pay for a rebuild
    pub qry_lat_b0: AtomicU64,
    pub qry_lat_b1: AtomicU64,
    pub qry_lat_b2: AtomicU64,
    pub qry_lat_b3: AtomicU64,
    pub qry_lat_b4: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn inc_update(&self) {
        self.updates_total.fetch_add(1, Ordering::Relaxed);
    }
    #[inline]
    pub fn inc_update_rejected(&self) {
        self.updates_rejected.fetch_add(1, Ordering::Relaxed);
    }
    #[inline]
    pub fn inc_range_query(&self) {
        self.range_queries_total.fetch_add(1, Ordering::Relaxed);
    }
    #[inline]
    pub fn inc_neighbor_query(&self) {
        self.neighbor_queries_total.fetch_add(1, Ordering::Relaxed);
    }
    #[inline]
    pub fn inc_query_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_update(&self, dur: Duration) {
        let ns = dur.as_nanos() as u64;
        // buckets: <250ns, <500ns, <1us, <2us, >=2us
        if ns < 250 {
            self.upd_lat_b0.fetch_add(1, Ordering::Relaxed);
        } else if ns < 500 {
            self.upd_lat_b1.fetch_add(1, Ordering::Relaxed);
        } else if ns < 1_000 {
            self.upd_lat_b2.fetch_add(1, Ordering::Relaxed);
        } else if ns < 2_000 {
            self.upd_lat_b3.fetch_add(1, Ordering::Relaxed);
        } else {
            self.upd_lat_b4.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_query(&self, dur: Duration) {
        let ns = dur.as_nanos() as u64;
        // buckets: <1us, <10us, <100us, <1ms, >=1ms
        if ns < 1_000 {
            self.qry_lat_b0.fetch_add(1, Ordering::Relaxed);
        } else if ns < 10_000 {
            self.qry_lat_b1.fetch_add(1, Ordering::Relaxed);
        } else if ns < 100_000 {
            self.qry_lat_b2.fetch_add(1, Ordering::Relaxed);
        } else if ns < 1_000_000 {
            self.qry_lat_b3.fetch_add(1, Ordering::Relaxed);
        } else {
            self.qry_lat_b4.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn prometheus_text(&self, rebuilds: u64, customers: u64) -> String {
        // NOTE: totals can stay Relaxed; prom scrape consistency isn’t transactional anyway.
        let upd = self.updates_total.load(Ordering::Relaxed);
        let updr = self.updates_rejected.load(Ordering::Relaxed);
        let rq = self.range_queries_total.load(Ordering::Relaxed);
        let nq = self.neighbor_queries_total.load(Ordering::Relaxed);
        let qr = self.queries_rejected.load(Ordering::Relaxed);

        let u0 = self.upd_lat_b0.load(Ordering::Relaxed);
        let u1 = self.upd_lat_b1.load(Ordering::Relaxed);
        let u2 = self.upd_lat_b2.load(Ordering::Relaxed);
        let u3 = self.upd_lat_b3.load(Ordering::Relaxed);
        let u4 = self.upd_lat_b4.load(Ordering::Relaxed);

        let q0 = self.qry_lat_b0.load(Ordering::Relaxed);
        let q1 = self.qry_lat_b1.load(Ordering::Relaxed);
        let q2 = self.qry_lat_b2.load(Ordering::Relaxed);
        let q3 = self.qry_lat_b3.load(Ordering::Relaxed);
        let q4 = self.qry_lat_b4.load(Ordering::Relaxed);

        format!(
            "\
# TYPE rankboard_updates_total counter
rankboard_updates_total {upd}
# TYPE rankboard_updates_rejected_total counter
rankboard_updates_rejected_total {updr}
# TYPE rankboard_range_queries_total counter
rankboard_range_queries_total {rq}
# TYPE rankboard_neighbor_queries_total counter
rankboard_neighbor_queries_total {nq}
# TYPE rankboard_queries_rejected_total counter
rankboard_queries_rejected_total {qr}
# TYPE rankboard_rank_rebuilds_total counter
rankboard_rank_rebuilds_total {rebuilds}
# TYPE rankboard_customers gauge
rankboard_customers {customers}
# TYPE rankboard_update_latency_bucket counter
rankboard_update_latency_bucket{{le=\"250\"}} {u0}
rankboard_update_latency_bucket{{le=\"500\"}} {u1}
rankboard_update_latency_bucket{{le=\"1000\"}} {u2}
rankboard_update_latency_bucket{{le=\"2000\"}} {u3}
rankboard_update_latency_bucket{{le=\"+Inf\"}} {u4}
# TYPE rankboard_query_latency_bucket counter
rankboard_query_latency_bucket{{le=\"1000\"}} {q0}
rankboard_query_latency_bucket{{le=\"10000\"}} {q1}
rankboard_query_latency_bucket{{le=\"100000\"}} {q2}
rankboard_query_latency_bucket{{le=\"1000000\"}} {q3}
rankboard_query_latency_bucket{{le=\"+Inf\"}} {q4}
"
        )
    }
}
