//! Network identifiers for the chains the wallet talks to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported EVM network.
///
/// Providers declare which of these they serve; everything else
/// short-circuits locally without a network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Mainnet,
    Rinkeby,
    XDai,
    Polygon,
    BinanceSmartChain,
    Heco,
    Arbitrum,
}

impl Network {
    /// All known networks, in chain-id order.
    pub const ALL: [Network; 7] = [
        Network::Mainnet,
        Network::Rinkeby,
        Network::BinanceSmartChain,
        Network::XDai,
        Network::Heco,
        Network::Polygon,
        Network::Arbitrum,
    ];

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Rinkeby => 4,
            Network::BinanceSmartChain => 56,
            Network::XDai => 100,
            Network::Heco => 128,
            Network::Polygon => 137,
            Network::Arbitrum => 42161,
        }
    }

    /// Short lowercase name, used for CLI args and endpoint tables.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Rinkeby => "rinkeby",
            Network::BinanceSmartChain => "bsc",
            Network::XDai => "xdai",
            Network::Heco => "heco",
            Network::Polygon => "polygon",
            Network::Arbitrum => "arbitrum",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" | "ethereum" => Ok(Network::Mainnet),
            "rinkeby" => Ok(Network::Rinkeby),
            "bsc" | "binance" | "binance-smart-chain" => Ok(Network::BinanceSmartChain),
            "xdai" | "gnosis" => Ok(Network::XDai),
            "heco" => Ok(Network::Heco),
            "polygon" | "matic" => Ok(Network::Polygon),
            "arbitrum" => Ok(Network::Arbitrum),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}
