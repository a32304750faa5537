//! Provider seams for the remote data sources.
//!
//! A provider performs the actual network call for one data source. The
//! outcome type keeps partial data type-distinct from both full success and
//! hard failure: a degraded fetch completed but is known-incomplete, and
//! must never be treated as authoritative.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chaindata_types::{AssetRef, CollectionStats, FetchError, Inventory, Network};

use crate::key::InventoryKey;

/// A fetch that completed, possibly with incomplete data.
///
/// `Degraded` entries are a subset of what a full fetch would return
/// (partial page failure, provider error on a subset); the merge policy
/// unions them with cached data instead of replacing it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<V> {
    Complete(V),
    Degraded(V),
}

impl<V> FetchOutcome<V> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchOutcome::Degraded(_))
    }

    pub fn value(&self) -> &V {
        match self {
            FetchOutcome::Complete(v) | FetchOutcome::Degraded(v) => v,
        }
    }

    pub fn into_value(self) -> V {
        match self {
            FetchOutcome::Complete(v) | FetchOutcome::Degraded(v) => v,
        }
    }
}

/// Remote source of NFT inventories, collection stats and asset images.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Networks this provider serves.
    fn supported_networks(&self) -> &[Network];

    fn supports(&self, network: Network) -> bool {
        self.supported_networks().contains(&network)
    }

    /// Fetch everything the owner holds on the key's network.
    ///
    /// An unsupported network resolves to an empty `Complete` without a
    /// network call; false absence-of-data must never look authoritative.
    async fn fetch_inventory(
        &self,
        key: &InventoryKey,
    ) -> Result<FetchOutcome<Inventory>, FetchError>;

    /// Fetch aggregate stats for a collection slug.
    async fn collection_stats(
        &self,
        slug: &str,
        network: Network,
    ) -> Result<CollectionStats, FetchError>;

    /// Fetch the image URL for a single asset.
    async fn asset_image_url(
        &self,
        asset: &AssetRef,
        network: Network,
    ) -> Result<String, FetchError>;
}

/// Remote source of block timestamps.
#[async_trait]
pub trait BlockReader: Send + Sync {
    /// Timestamp of a finalized block.
    ///
    /// Fails with [`FetchError::Configuration`] when no client can be
    /// constructed for the network.
    async fn block_timestamp(
        &self,
        network: Network,
        number: u64,
    ) -> Result<DateTime<Utc>, FetchError>;
}
