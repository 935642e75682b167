//! Query counters
//!
//! Counters only, monotonic, reset on process start. Atomics with Relaxed
//! ordering; readers tolerate slightly stale values.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    records_loaded: AtomicU64,
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
    queries_not_ready: AtomicU64,
    /// Sum of records examined by every executed query
    records_scanned: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_records_loaded(&self, count: u64) {
        self.records_loaded.store(count, Ordering::Relaxed);
    }

    pub fn record_query(&self, scanned: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.records_scanned.fetch_add(scanned, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_not_ready(&self) {
        self.queries_not_ready.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_loaded: self.records_loaded.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            queries_not_ready: self.queries_not_ready.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of every counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_loaded: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub queries_not_ready: u64,
    pub records_scanned: u64,
}
