//! Durable keyed persistence for wallet remote data.
//!
//! This crate provides:
//! - `KeyedStore`: the read/write/clear contract the orchestration layer
//!   persists through
//! - `FsKeyedStore`: sharded filesystem storage with atomic writes and a
//!   write-through in-memory layer
//! - `MemoryKeyedStore`: in-memory implementation for tests
//! - `CacheMetrics`: lookup counters shared with the fetch layer
//!
//! The store is deliberately dumb: last-writer-wins at key granularity, no
//! knowledge of merge semantics. Reconciliation happens above it, in
//! `chaindata-fetcher`.

pub mod keyed;
pub mod metrics;
pub mod paths;

pub use keyed::{FsKeyedStore, KeyedStore, MemoryKeyedStore, StoreKey};
pub use metrics::{CacheMetrics, MetricsSnapshot};
