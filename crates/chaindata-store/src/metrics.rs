//! Lookup metrics for cache and fetch operations.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe counters, shared between the store and the fetch layer.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    /// Reads served from the in-memory layer.
    memory_hits: Arc<AtomicU64>,
    /// Reads served from disk.
    disk_hits: Arc<AtomicU64>,
    /// Reads that found nothing cached.
    misses: Arc<AtomicU64>,
    /// Remote fetches issued (cache miss or refresh).
    remote_fetches: Arc<AtomicU64>,
    /// Callers that joined an already in-flight fetch instead of issuing one.
    inflight_joins: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_memory_hit(&self) {
        self.memory_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_disk_hit(&self) {
        self.disk_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_fetch(&self) {
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inflight_join(&self) {
        self.inflight_joins.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            inflight_joins: self.inflight_joins.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time counter values, for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub misses: u64,
    pub remote_fetches: u64,
    pub inflight_joins: u64,
}

impl MetricsSnapshot {
    /// Total cache reads.
    pub fn total_reads(&self) -> u64 {
        self.memory_hits + self.disk_hits + self.misses
    }

    /// Fraction of reads served from cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_reads();
        if total == 0 {
            return 0.0;
        }
        (self.memory_hits + self.disk_hits) as f64 / total as f64
    }

    /// Format a human-readable report.
    pub fn format_report(&self) -> String {
        format!(
            "Cache lookups: {} memory, {} disk, {} miss ({:.1}% hit rate)\n\
             Remote fetches: {} issued, {} joined in-flight",
            self.memory_hits,
            self.disk_hits,
            self.misses,
            self.hit_rate() * 100.0,
            self.remote_fetches,
            self.inflight_joins,
        )
    }
}
