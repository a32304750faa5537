//! Block timestamp cache: the fetch-cache pattern at its minimal form.
//!
//! Block timestamps are immutable once finalized, so the first successful
//! fetch wins and is cached for the life of the process; there is no merge
//! or degraded handling. Concurrent lookups for the same block share one
//! RPC call through the in-flight registry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use chaindata_store::CacheMetrics;
use chaindata_types::{FetchError, Network};

use crate::inflight::InFlightRegistry;
use crate::key::BlockKey;
use crate::provider::BlockReader;

/// Per-process cache of (network, block number) -> timestamp.
pub struct BlockTimestampCache {
    reader: Arc<dyn BlockReader>,
    cache: Arc<RwLock<HashMap<BlockKey, DateTime<Utc>>>>,
    inflight: InFlightRegistry<BlockKey, DateTime<Utc>>,
    metrics: CacheMetrics,
}

impl BlockTimestampCache {
    pub fn new(reader: Arc<dyn BlockReader>) -> Self {
        let metrics = CacheMetrics::new();
        Self {
            reader,
            cache: Arc::new(RwLock::new(HashMap::new())),
            inflight: InFlightRegistry::with_metrics(metrics.clone()),
            metrics,
        }
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Number of blocks with a cached timestamp.
    pub fn cached_blocks(&self) -> usize {
        self.cache.read().len()
    }

    /// Timestamp of `number` on `network`.
    pub async fn block_timestamp(
        &self,
        network: Network,
        number: u64,
    ) -> Result<DateTime<Utc>, FetchError> {
        let key = BlockKey::new(network, number);

        if let Some(ts) = self.cache.read().get(&key).copied() {
            self.metrics.record_memory_hit();
            return Ok(ts);
        }
        self.metrics.record_miss();

        let reader = Arc::clone(&self.reader);
        let cache = Arc::clone(&self.cache);

        self.inflight
            .acquire_or_join(key, move || async move {
                let ts = reader.block_timestamp(key.network, key.number).await?;
                // Finalized timestamps never change; keep the first value.
                cache.write().entry(key).or_insert(ts);
                debug!(network = %key.network, block = key.number, %ts, "cached block timestamp");
                Ok(ts)
            })
            .await
    }
}
