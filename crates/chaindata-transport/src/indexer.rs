//! NFT indexer client.
//!
//! Fetches owner inventories, collection stats and asset image URLs from an
//! OpenSea-style REST API. Inventory fetching is paginated; a page failure
//! after at least one successful page degrades the result instead of failing
//! it, so callers can merge what was obtained with previously cached data.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use chaindata_types::{Address, AssetRef, CollectionStats, Inventory, Network, NonFungible};

use crate::endpoints::{http_timeout_ms, indexer_endpoint};

/// Page size for owner-asset requests.
const PAGE_LIMIT: usize = 50;

/// Hard cap on pages walked per owner. Hitting the cap marks the fetch
/// degraded: there may be more assets than we saw.
const MAX_PAGES: usize = 40;

/// Result of an inventory fetch: what was obtained, and whether it is
/// known-incomplete.
#[derive(Debug, Clone)]
pub struct AssetsFetch {
    pub inventory: Inventory,
    pub degraded: bool,
}

/// Blocking client for an OpenSea-style NFT indexer.
#[derive(Clone, Debug)]
pub struct IndexerClient {
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct RawAssetsPage {
    #[serde(default)]
    assets: Vec<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    token_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    asset_contract: RawContract,
    #[serde(default)]
    collection: Option<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct RawContract {
    address: String,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct RawStatsResponse {
    stats: RawStats,
}

#[derive(Debug, Deserialize, Default)]
struct RawStats {
    #[serde(default)]
    floor_price: Option<f64>,
    #[serde(default)]
    total_volume: f64,
    #[serde(default)]
    total_sales: f64,
    #[serde(default)]
    total_supply: f64,
    #[serde(default)]
    num_owners: f64,
    #[serde(default)]
    average_price: f64,
}

#[derive(Debug, Deserialize)]
struct RawAssetDetail {
    #[serde(default)]
    image_url: Option<String>,
}

impl IndexerClient {
    /// Client for a network the indexer serves, or `None` otherwise.
    pub fn for_network(network: Network) -> Option<Self> {
        indexer_endpoint(network).map(Self::new)
    }

    /// Client against a specific base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(http_timeout_ms()))
            .build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    /// Fetch every asset the owner holds, walking pages until a short page.
    ///
    /// A failed page after at least one successful one returns the partial
    /// inventory with `degraded = true`. A failure on the first page is a
    /// hard error.
    pub fn fetch_owner_assets(&self, owner: &Address) -> Result<AssetsFetch> {
        let mut inventory = Inventory::new();
        let mut degraded = false;
        let mut page = 0;

        loop {
            if page >= MAX_PAGES {
                warn!(owner = %owner, pages = page, "asset page cap reached, result degraded");
                degraded = true;
                break;
            }

            match self.fetch_assets_page(owner, page * PAGE_LIMIT) {
                Ok(assets) => {
                    let len = assets.len();
                    for asset in assets {
                        inventory.push(asset);
                    }
                    if len < PAGE_LIMIT {
                        break;
                    }
                }
                Err(e) if page == 0 => return Err(e),
                Err(e) => {
                    warn!(owner = %owner, page, "asset page failed, result degraded: {e:#}");
                    degraded = true;
                    break;
                }
            }
            page += 1;
        }

        debug!(
            owner = %owner,
            assets = inventory.asset_count(),
            degraded,
            "fetched owner assets"
        );
        Ok(AssetsFetch {
            inventory,
            degraded,
        })
    }

    fn fetch_assets_page(&self, owner: &Address, offset: usize) -> Result<Vec<NonFungible>> {
        let url = format!(
            "{}/api/v1/assets?owner={}&limit={}&offset={}",
            self.base_url, owner, PAGE_LIMIT, offset
        );

        let page: RawAssetsPage = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| anyhow!("Failed to fetch assets page: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse assets page: {}", e))?;

        decode_assets(page)
    }

    /// Fetch aggregate stats for a collection slug.
    pub fn collection_stats(&self, slug: &str) -> Result<CollectionStats> {
        let url = format!("{}/api/v1/collection/{}/stats", self.base_url, slug);

        let response: RawStatsResponse = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| anyhow!("Failed to fetch collection stats: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse collection stats: {}", e))?;

        Ok(decode_stats(response.stats))
    }

    /// Fetch the image URL for a single asset.
    pub fn asset_image_url(&self, asset: &AssetRef) -> Result<String> {
        let url = format!(
            "{}/api/v1/asset/{}/{}",
            self.base_url, asset.contract, asset.token_id
        );

        let detail: RawAssetDetail = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| anyhow!("Failed to fetch asset detail: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse asset detail: {}", e))?;

        detail
            .image_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow!("Asset {}/{} has no image URL", asset.contract, asset.token_id))
    }
}

fn decode_assets(page: RawAssetsPage) -> Result<Vec<NonFungible>> {
    let mut out = Vec::with_capacity(page.assets.len());
    for raw in page.assets {
        let contract: Address = raw
            .asset_contract
            .address
            .parse()
            .map_err(|e| anyhow!("Bad contract address in asset response: {}", e))?;
        out.push(NonFungible {
            contract,
            name: raw.name.unwrap_or_else(|| format!("#{}", raw.token_id)),
            token_id: raw.token_id,
            description: raw.description,
            image_url: raw.image_url.filter(|u| !u.is_empty()),
            collection_slug: raw.collection.map(|c| c.slug),
        });
    }
    Ok(out)
}

fn decode_stats(raw: RawStats) -> CollectionStats {
    CollectionStats {
        floor_price: raw.floor_price,
        total_volume: raw.total_volume,
        total_sales: raw.total_sales as u64,
        total_supply: raw.total_supply as u64,
        num_owners: raw.num_owners as u64,
        average_price: raw.average_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_assets_page() {
        let json = serde_json::json!({
            "assets": [
                {
                    "token_id": "1234",
                    "name": "Doodle #1234",
                    "image_url": "https://img.example/1234.png",
                    "asset_contract": { "address": "0x8a90cab2b38dba80c64b7734e58ee1db38b8992e" },
                    "collection": { "slug": "doodles-official" }
                },
                {
                    "token_id": "7",
                    "name": null,
                    "image_url": "",
                    "asset_contract": { "address": "0x8a90cab2b38dba80c64b7734e58ee1db38b8992e" }
                }
            ]
        });
        let page: RawAssetsPage = serde_json::from_value(json).unwrap();
        let assets = decode_assets(page).unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].name, "Doodle #1234");
        assert_eq!(assets[0].collection_slug.as_deref(), Some("doodles-official"));
        // Missing name falls back to the token id; empty image URL drops to None.
        assert_eq!(assets[1].name, "#7");
        assert_eq!(assets[1].image_url, None);
    }

    #[test]
    fn test_decode_assets_rejects_bad_contract() {
        let json = serde_json::json!({
            "assets": [{
                "token_id": "1",
                "asset_contract": { "address": "not-an-address" }
            }]
        });
        let page: RawAssetsPage = serde_json::from_value(json).unwrap();
        assert!(decode_assets(page).is_err());
    }

    #[test]
    fn test_decode_stats() {
        let raw: RawStatsResponse = serde_json::from_value(serde_json::json!({
            "stats": {
                "floor_price": 1.25,
                "total_volume": 1000.5,
                "total_sales": 420.0,
                "total_supply": 10000.0,
                "num_owners": 3000.0,
                "average_price": 2.4
            }
        }))
        .unwrap();
        let stats = decode_stats(raw.stats);
        assert_eq!(stats.floor_price, Some(1.25));
        assert_eq!(stats.total_sales, 420);
        assert_eq!(stats.num_owners, 3000);
    }

    #[test]
    fn test_for_network_respects_support_table() {
        assert!(IndexerClient::for_network(Network::Mainnet).is_some());
        assert!(IndexerClient::for_network(Network::Polygon).is_none());
    }
}
