//! NFT inventory types.
//!
//! An [`Inventory`] is the unit the fetch-cache-merge pipeline operates on:
//! everything a wallet owns on one network, grouped by contract. The merge
//! rules live in `chaindata-fetcher`; this module only provides the data
//! shapes and the per-contract set union they build on.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A single non-fungible token.
///
/// Identity within a contract is the token id: two `NonFungible`s with the
/// same contract and token id describe the same on-chain asset, regardless
/// of metadata differences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonFungible {
    /// Contract that minted the token.
    pub contract: Address,

    /// Token id, kept as a decimal string (ids routinely exceed u64).
    pub token_id: String,

    /// Display name reported by the indexer.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Collection slug, when the indexer groups this token into a collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,
}

impl NonFungible {
    /// Minimal constructor used by tests and the transport decoder.
    pub fn new(contract: Address, token_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            contract,
            token_id: token_id.into(),
            name: name.into(),
            description: None,
            image_url: None,
            collection_slug: None,
        }
    }
}

/// Everything an owner holds on one network, grouped by contract address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    entries: HashMap<Address, Vec<NonFungible>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from (contract, assets) pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (Address, Vec<NonFungible>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Add one asset under its contract.
    pub fn push(&mut self, asset: NonFungible) {
        self.entries.entry(asset.contract).or_default().push(asset);
    }

    /// Assets for one contract, if any are known.
    pub fn get(&self, contract: &Address) -> Option<&[NonFungible]> {
        self.entries.get(contract).map(|v| v.as_slice())
    }

    /// Iterate (contract, assets) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Vec<NonFungible>)> {
        self.entries.iter()
    }

    /// Number of contracts with at least one asset.
    pub fn contract_count(&self) -> usize {
        self.entries.values().filter(|v| !v.is_empty()).count()
    }

    /// Total number of assets across all contracts.
    pub fn asset_count(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }

    /// True when no contract holds any asset.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|v| v.is_empty())
    }

    /// Token ids known for a contract, sorted. Convenience for tests and
    /// merge assertions.
    pub fn token_ids(&self, contract: &Address) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .get(contract)
            .map(|assets| assets.iter().map(|a| a.token_id.clone()).collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Per-contract set union of `self` and `other`.
    ///
    /// For every contract present in either side, keeps the union of assets,
    /// deduplicated by token id with `self`'s copy winning on overlap. Asset
    /// lists come out sorted by token id so the result is deterministic.
    pub fn union_with(&self, other: &Inventory) -> Inventory {
        let mut merged: HashMap<Address, Vec<NonFungible>> = self.entries.clone();
        for (contract, assets) in &other.entries {
            let slot = merged.entry(*contract).or_default();
            let seen: HashSet<String> = slot.iter().map(|a| a.token_id.clone()).collect();
            for asset in assets {
                if !seen.contains(&asset.token_id) {
                    slot.push(asset.clone());
                }
            }
        }
        for assets in merged.values_mut() {
            assets.sort_by(|a, b| a.token_id.cmp(&b.token_id));
        }
        Inventory { entries: merged }
    }
}

/// Aggregate stats for an NFT collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub floor_price: Option<f64>,
    pub total_volume: f64,
    pub total_sales: u64,
    pub total_supply: u64,
    pub num_owners: u64,
    pub average_price: f64,
}

/// Pointer to a single asset, used for image-URL lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub contract: Address,
    pub token_id: String,
}

impl AssetRef {
    pub fn new(contract: Address, token_id: impl Into<String>) -> Self {
        Self {
            contract,
            token_id: token_id.into(),
        }
    }
}
