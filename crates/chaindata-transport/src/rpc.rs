//! JSON-RPC node client.
//!
//! The only call this layer needs is `eth_getBlockByNumber`, to resolve a
//! block number to its timestamp. Client construction is where
//! misconfiguration surfaces: a network with no endpoint fails fast with a
//! descriptive error instead of silently returning a default.

use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use chaindata_types::{FetchError, Network};

use crate::endpoints::{http_timeout_ms, rpc_endpoint};

/// Blocking JSON-RPC client for one network.
#[derive(Clone, Debug)]
pub struct RpcClient {
    network: Network,
    url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<RawBlock>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcClient {
    /// Construct a client for a network.
    ///
    /// Fails with [`FetchError::Configuration`] when no endpoint is
    /// configured for the network.
    pub fn for_network(network: Network) -> Result<Self, FetchError> {
        let url = rpc_endpoint(network).ok_or_else(|| {
            FetchError::configuration(network, "no RPC endpoint configured")
        })?;
        Ok(Self::new(network, url))
    }

    /// Client against a specific endpoint URL.
    pub fn new(network: Network, url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(http_timeout_ms()))
            .build();
        Self {
            network,
            url: url.into(),
            agent,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Timestamp of a block, from `eth_getBlockByNumber`.
    pub fn block_timestamp(&self, number: u64) -> Result<DateTime<Utc>> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBlockByNumber",
            "params": [format!("0x{:x}", number), false],
        });

        let response: RpcResponse = self
            .agent
            .post(&self.url)
            .send_json(body)
            .map_err(|e| anyhow!("Failed to call eth_getBlockByNumber: {}", e))?
            .into_json()
            .map_err(|e| anyhow!("Failed to parse RPC response: {}", e))?;

        if let Some(err) = response.error {
            return Err(anyhow!("RPC error {}: {}", err.code, err.message));
        }

        let block = response
            .result
            .ok_or_else(|| anyhow!("Block {} not found on {}", number, self.network))?;
        let timestamp = decode_hex_timestamp(&block.timestamp)?;

        debug!(network = %self.network, block = number, %timestamp, "resolved block timestamp");
        Ok(timestamp)
    }
}

/// Decode a hex-quantity timestamp ("0x5f5e100") into a UTC datetime.
fn decode_hex_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let bare = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let seconds = u64::from_str_radix(bare, 16)
        .map_err(|e| anyhow!("Bad block timestamp {:?}: {}", raw, e))?;
    DateTime::from_timestamp(seconds as i64, 0)
        .ok_or_else(|| anyhow!("Block timestamp {} out of range", seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_timestamp() {
        // 2020-09-01T00:00:00Z
        let ts = decode_hex_timestamp("0x5f4d8700").unwrap();
        assert_eq!(ts.timestamp(), 0x5f4d8700);

        assert!(decode_hex_timestamp("0xZZ").is_err());
        assert!(decode_hex_timestamp("").is_err());
    }

    #[test]
    fn test_for_network_fails_without_endpoint() {
        let err = RpcClient::for_network(Network::Rinkeby).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Configuration {
                network: Network::Rinkeby,
                ..
            }
        ));
    }

    #[test]
    fn test_for_network_with_default_endpoint() {
        let client = RpcClient::for_network(Network::Mainnet).unwrap();
        assert_eq!(client.network(), Network::Mainnet);
    }

    #[test]
    fn test_parse_rpc_error_body() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"header not found"}}"#,
        )
        .unwrap();
        let err = response.error.unwrap();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "header not found");
    }
}
