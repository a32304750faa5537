//! Inventory service: the full fetch-cache-merge pipeline for NFT holdings.
//!
//! For each key the pipeline is: acquire-or-join the in-flight slot, fetch
//! from the provider, reconcile with the previously persisted value, persist,
//! then resolve to every waiter. The store write happens before the future
//! resolves, so callers never observe a value that is not already durable.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use chaindata_store::{CacheMetrics, KeyedStore};
use chaindata_types::{Address, AssetRef, CollectionStats, FetchError, Inventory, Network};

use crate::inflight::InFlightRegistry;
use crate::key::{AssetKey, InventoryKey, StatsKey};
use crate::merge::reconcile_inventory;
use crate::provider::InventoryProvider;

/// Orchestrates NFT inventory, collection stats and asset image lookups for
/// one provider and one durable store.
pub struct InventoryService {
    provider: Arc<dyn InventoryProvider>,
    store: Arc<dyn KeyedStore<InventoryKey, Inventory>>,
    metrics: CacheMetrics,
    inventories: InFlightRegistry<InventoryKey, Inventory>,
    stats_inflight: InFlightRegistry<StatsKey, CollectionStats>,
    stats_cache: Arc<RwLock<HashMap<StatsKey, CollectionStats>>>,
    image_inflight: InFlightRegistry<AssetKey, String>,
    image_cache: Arc<RwLock<HashMap<AssetKey, String>>>,
}

impl InventoryService {
    pub fn new(
        provider: Arc<dyn InventoryProvider>,
        store: Arc<dyn KeyedStore<InventoryKey, Inventory>>,
    ) -> Self {
        let metrics = CacheMetrics::new();
        Self {
            provider,
            store,
            inventories: InFlightRegistry::with_metrics(metrics.clone()),
            stats_inflight: InFlightRegistry::with_metrics(metrics.clone()),
            stats_cache: Arc::new(RwLock::new(HashMap::new())),
            image_inflight: InFlightRegistry::with_metrics(metrics.clone()),
            image_cache: Arc::new(RwLock::new(HashMap::new())),
            metrics,
        }
    }

    /// Counters for this service's fetches and cache lookups.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Everything `owner` holds on `network`.
    ///
    /// A network the provider does not serve resolves to an empty inventory
    /// locally, with no provider call and nothing cached.
    pub async fn non_fungibles(
        &self,
        owner: Address,
        network: Network,
    ) -> Result<Inventory, FetchError> {
        if !self.provider.supports(network) {
            debug!(%network, "network not supported by provider, returning empty inventory");
            return Ok(Inventory::new());
        }

        let key = InventoryKey::new(owner, network);
        let provider = Arc::clone(&self.provider);
        let store = Arc::clone(&self.store);

        self.inventories
            .acquire_or_join(key, move || async move {
                let outcome = provider.fetch_inventory(&key).await?;
                let previous = store.read(&key).map_err(|e| FetchError::storage(e))?;
                let had_previous = previous.is_some();

                let degraded = outcome.is_degraded();
                let merged = reconcile_inventory(previous.as_ref(), outcome);

                if merged.is_empty() && !had_previous {
                    // An empty placeholder would mask the next retry.
                    debug!(
                        owner = %key.owner,
                        network = %key.network,
                        "reconciled inventory empty with no prior entry, skipping persist"
                    );
                } else {
                    store.write(&key, &merged).map_err(|e| FetchError::storage(e))?;
                }

                debug!(
                    owner = %key.owner,
                    network = %key.network,
                    assets = merged.asset_count(),
                    degraded,
                    "inventory reconciled"
                );
                Ok(merged)
            })
            .await
    }

    /// Aggregate stats for a collection. Concurrent lookups for the same
    /// slug share one provider call; the latest clean result is kept for
    /// [`Self::last_collection_stats`].
    pub async fn collection_stats(
        &self,
        slug: &str,
        network: Network,
    ) -> Result<CollectionStats, FetchError> {
        let key = StatsKey {
            slug: slug.to_string(),
            network,
        };
        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.stats_cache);
        let fetch_key = key.clone();

        self.stats_inflight
            .acquire_or_join(key, move || async move {
                let stats = provider
                    .collection_stats(&fetch_key.slug, fetch_key.network)
                    .await?;
                cache.write().insert(fetch_key, stats.clone());
                Ok(stats)
            })
            .await
    }

    /// Last successfully fetched stats for a collection, if any. Callers
    /// wanting a stale value after a failed refresh use this; the service
    /// itself never substitutes cache for an error.
    pub fn last_collection_stats(&self, slug: &str, network: Network) -> Option<CollectionStats> {
        let key = StatsKey {
            slug: slug.to_string(),
            network,
        };
        self.stats_cache.read().get(&key).cloned()
    }

    /// Image URL for one asset. Image URLs are immutable content pointers,
    /// so the first fetched value is cached for the life of the service.
    pub async fn asset_image_url(
        &self,
        asset: &AssetRef,
        network: Network,
    ) -> Result<String, FetchError> {
        let key = AssetKey {
            asset: asset.clone(),
            network,
        };
        if let Some(url) = self.image_cache.read().get(&key) {
            self.metrics.record_memory_hit();
            return Ok(url.clone());
        }
        self.metrics.record_miss();

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.image_cache);
        let fetch_key = key.clone();

        self.image_inflight
            .acquire_or_join(key, move || async move {
                let url = provider
                    .asset_image_url(&fetch_key.asset, fetch_key.network)
                    .await?;
                cache.write().insert(fetch_key, url.clone());
                Ok(url)
            })
            .await
    }
}
