//! Composite request keys.
//!
//! Keys identify one cache entry and one in-flight request slot. They are
//! immutable, hashable and totally ordered; the durable stores additionally
//! key files by [`StoreKey::storage_key`].

use chaindata_store::StoreKey;
use chaindata_types::{Address, AssetRef, Network};

/// Key for inventory-style caches: one entry per (owner, network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InventoryKey {
    pub owner: Address,
    pub network: Network,
}

impl InventoryKey {
    pub fn new(owner: Address, network: Network) -> Self {
        Self { owner, network }
    }
}

impl StoreKey for InventoryKey {
    fn storage_key(&self) -> String {
        format!("{}-{}", self.owner.to_bare_hex(), self.network.chain_id())
    }
}

/// Key for timestamp caches: one entry per (network, block number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey {
    pub network: Network,
    pub number: u64,
}

impl BlockKey {
    pub fn new(network: Network, number: u64) -> Self {
        Self { network, number }
    }
}

impl StoreKey for BlockKey {
    fn storage_key(&self) -> String {
        format!("{}-{}", self.network.chain_id(), self.number)
    }
}

/// In-flight key for collection stats lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsKey {
    pub slug: String,
    pub network: Network,
}

/// In-flight key for asset image URL lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub asset: AssetRef,
    pub network: Network,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap()
    }

    #[test]
    fn test_inventory_storage_key() {
        let key = InventoryKey::new(owner(), Network::Mainnet);
        assert_eq!(
            key.storage_key(),
            "d8da6bf26964af9d7eed9e03e53415d37aa96045-1"
        );
    }

    #[test]
    fn test_block_storage_key() {
        let key = BlockKey::new(Network::Polygon, 123_456);
        assert_eq!(key.storage_key(), "137-123456");
    }

    #[test]
    fn test_keys_distinguish_networks() {
        let a = InventoryKey::new(owner(), Network::Mainnet);
        let b = InventoryKey::new(owner(), Network::Polygon);
        assert_ne!(a, b);
        assert_ne!(a.storage_key(), b.storage_key());
    }
}
