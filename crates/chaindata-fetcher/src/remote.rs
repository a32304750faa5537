//! Concrete providers backed by the blocking HTTP transport clients.
//!
//! The transport clients are blocking by design; these adapters drive them
//! through `tokio::task::spawn_blocking` so fetches can run on any worker
//! without stalling the runtime.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use chaindata_transport::{IndexerClient, RpcClient};
use chaindata_types::{AssetRef, CollectionStats, FetchError, Inventory, Network};

use crate::key::InventoryKey;
use crate::provider::{BlockReader, FetchOutcome, InventoryProvider};

/// Networks the OpenSea-style indexer serves.
const INDEXER_NETWORKS: [Network; 2] = [Network::Mainnet, Network::Rinkeby];

/// NFT data from an OpenSea-style indexer.
pub struct OpenSeaProvider {
    clients: HashMap<Network, IndexerClient>,
    supported: Vec<Network>,
}

impl OpenSeaProvider {
    pub fn new() -> Self {
        let mut clients = HashMap::new();
        for network in INDEXER_NETWORKS {
            if let Some(client) = IndexerClient::for_network(network) {
                clients.insert(network, client);
            }
        }
        let supported: Vec<Network> = clients.keys().copied().collect();
        Self { clients, supported }
    }

    fn client(&self, network: Network) -> Result<IndexerClient, FetchError> {
        self.clients.get(&network).cloned().ok_or_else(|| {
            FetchError::configuration(network, "indexer does not serve this network")
        })
    }
}

impl Default for OpenSeaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryProvider for OpenSeaProvider {
    fn supported_networks(&self) -> &[Network] {
        &self.supported
    }

    async fn fetch_inventory(
        &self,
        key: &InventoryKey,
    ) -> Result<FetchOutcome<Inventory>, FetchError> {
        let Some(client) = self.clients.get(&key.network).cloned() else {
            debug!(network = %key.network, "network not served by indexer, returning empty inventory");
            return Ok(FetchOutcome::Complete(Inventory::new()));
        };

        let owner = key.owner;
        let fetch = tokio::task::spawn_blocking(move || client.fetch_owner_assets(&owner))
            .await
            .map_err(|e| FetchError::provider(format!("fetch task failed: {e}")))?
            .map_err(|e| FetchError::provider(format!("{e:#}")))?;

        Ok(if fetch.degraded {
            FetchOutcome::Degraded(fetch.inventory)
        } else {
            FetchOutcome::Complete(fetch.inventory)
        })
    }

    async fn collection_stats(
        &self,
        slug: &str,
        network: Network,
    ) -> Result<CollectionStats, FetchError> {
        let client = self.client(network)?;
        let slug = slug.to_string();
        tokio::task::spawn_blocking(move || client.collection_stats(&slug))
            .await
            .map_err(|e| FetchError::provider(format!("fetch task failed: {e}")))?
            .map_err(|e| FetchError::provider(format!("{e:#}")))
    }

    async fn asset_image_url(
        &self,
        asset: &AssetRef,
        network: Network,
    ) -> Result<String, FetchError> {
        let client = self.client(network)?;
        let asset = asset.clone();
        tokio::task::spawn_blocking(move || client.asset_image_url(&asset))
            .await
            .map_err(|e| FetchError::provider(format!("fetch task failed: {e}")))?
            .map_err(|e| FetchError::provider(format!("{e:#}")))
    }
}

/// Block timestamps from per-network JSON-RPC nodes.
///
/// Clients are constructed per call: construction is where a missing
/// endpoint surfaces, and it must fail fast rather than cache a default.
pub struct RpcBlockReader;

impl RpcBlockReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RpcBlockReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockReader for RpcBlockReader {
    async fn block_timestamp(
        &self,
        network: Network,
        number: u64,
    ) -> Result<DateTime<Utc>, FetchError> {
        let client = RpcClient::for_network(network)?;
        tokio::task::spawn_blocking(move || client.block_timestamp(number))
            .await
            .map_err(|e| FetchError::provider(format!("fetch task failed: {e}")))?
            .map_err(|e| FetchError::provider(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_network_is_empty_complete_without_call() {
        let provider = OpenSeaProvider::new();
        assert!(!provider.supports(Network::Polygon));

        let key = InventoryKey::new(
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap(),
            Network::Polygon,
        );
        let outcome = provider.fetch_inventory(&key).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Complete(Inventory::new()));
    }

    #[test]
    fn test_provider_supports_indexer_networks() {
        let provider = OpenSeaProvider::new();
        assert!(provider.supports(Network::Mainnet));
        assert!(provider.supports(Network::Rinkeby));
        assert!(!provider.supports(Network::Arbitrum));
    }

    #[tokio::test]
    async fn test_block_reader_fails_fast_without_endpoint() {
        let reader = RpcBlockReader::new();
        let err = reader
            .block_timestamp(Network::Rinkeby, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Configuration { .. }));
    }
}
