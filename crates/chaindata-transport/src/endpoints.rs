//! Per-network endpoint resolution.
//!
//! Defaults below serve the common case; `CHAINDATA_INDEXER_URL` and
//! `CHAINDATA_RPC_URL` override them for self-hosted or proxied setups.
//! A network without an entry is simply not served by that source.

use chaindata_types::env::env_var_or;
use chaindata_types::Network;

const MAINNET_INDEXER: &str = "https://api.opensea.io";
const RINKEBY_INDEXER: &str = "https://rinkeby-api.opensea.io";

const MAINNET_RPC: &str = "https://cloudflare-eth.com";
const BSC_RPC: &str = "https://bsc-dataseed.binance.org";
const XDAI_RPC: &str = "https://rpc.gnosischain.com";
const HECO_RPC: &str = "https://http-mainnet.hecochain.com";
const POLYGON_RPC: &str = "https://polygon-rpc.com";
const ARBITRUM_RPC: &str = "https://arb1.arbitrum.io/rpc";

/// Default HTTP timeout for both sources, in milliseconds.
pub fn http_timeout_ms() -> u64 {
    env_var_or("CHAINDATA_HTTP_TIMEOUT_MS", 6000)
}

/// Indexer base URL for a network, or `None` when the indexer does not
/// serve that network.
pub fn indexer_endpoint(network: Network) -> Option<String> {
    if let Ok(value) = std::env::var("CHAINDATA_INDEXER_URL") {
        if !value.trim().is_empty() {
            return Some(value);
        }
    }
    match network {
        Network::Mainnet => Some(MAINNET_INDEXER.to_string()),
        Network::Rinkeby => Some(RINKEBY_INDEXER.to_string()),
        _ => None,
    }
}

/// JSON-RPC endpoint for a network, or `None` when no node is configured.
///
/// Rinkeby has no default: the public endpoints were retired with the
/// testnet, so timestamp lookups there require an explicit override.
pub fn rpc_endpoint(network: Network) -> Option<String> {
    if let Ok(value) = std::env::var("CHAINDATA_RPC_URL") {
        if !value.trim().is_empty() {
            return Some(value);
        }
    }
    match network {
        Network::Mainnet => Some(MAINNET_RPC.to_string()),
        Network::Rinkeby => None,
        Network::BinanceSmartChain => Some(BSC_RPC.to_string()),
        Network::XDai => Some(XDAI_RPC.to_string()),
        Network::Heco => Some(HECO_RPC.to_string()),
        Network::Polygon => Some(POLYGON_RPC.to_string()),
        Network::Arbitrum => Some(ARBITRUM_RPC.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexer_serves_mainnet_and_rinkeby_only() {
        assert!(indexer_endpoint(Network::Mainnet).is_some());
        assert!(indexer_endpoint(Network::Rinkeby).is_some());
        assert!(indexer_endpoint(Network::Polygon).is_none());
        assert!(indexer_endpoint(Network::Arbitrum).is_none());
    }

    #[test]
    fn test_rpc_defaults() {
        assert_eq!(
            rpc_endpoint(Network::Mainnet).as_deref(),
            Some(MAINNET_RPC)
        );
        assert!(rpc_endpoint(Network::Rinkeby).is_none());
    }
}
