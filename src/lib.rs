//! chaindata: keyed fetch-cache-merge engine for wallet remote data.
//!
//! The workspace orchestrates blockchain-derived data (NFT inventories,
//! collection stats, block timestamps) fetched from unreliable, rate-limited
//! remote sources. Results are cached by composite key, partial responses
//! are merged with previously cached data instead of replacing it, and
//! concurrent requests for the same key share a single remote call.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chaindata::{
//!     default_cache_dir, FsKeyedStore, InventoryService, Network, OpenSeaProvider,
//! };
//!
//! let store = FsKeyedStore::open(default_cache_dir(), "inventory")?;
//! let service = InventoryService::new(Arc::new(OpenSeaProvider::new()), Arc::new(store));
//! let inventory = service.non_fungibles(owner, Network::Mainnet).await?;
//! ```

use std::path::PathBuf;

pub use chaindata_fetcher::{
    reconcile_inventory, BlockKey, BlockReader, BlockTimestampCache, FetchOutcome,
    InFlightRegistry, InventoryKey, InventoryProvider, InventoryService, OpenSeaProvider,
    RpcBlockReader,
};
pub use chaindata_store::{CacheMetrics, FsKeyedStore, KeyedStore, MemoryKeyedStore, StoreKey};
pub use chaindata_transport::{IndexerClient, RpcClient};
pub use chaindata_types::{
    Address, AssetRef, CollectionStats, FetchError, Inventory, Network, NonFungible,
};

/// Default durable cache location: `CHAINDATA_CACHE_DIR` if set, otherwise
/// the platform cache directory.
pub fn default_cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHAINDATA_CACHE_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chaindata")
}
