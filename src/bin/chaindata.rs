//! chaindata: CLI for the wallet remote-data services.
//!
//! ## Example Usage
//!
//! ```bash
//! # NFT inventory for a wallet
//! chaindata nfts --owner 0xd8da6bf26964af9d7eed9e03e53415d37aa96045
//!
//! # Collection stats
//! chaindata stats --slug doodles-official
//!
//! # Image URL for one asset
//! chaindata image --contract 0x8a90ca... --token-id 1234
//!
//! # Block timestamp
//! chaindata timestamp --block 15537393
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use chaindata::{
    default_cache_dir, Address, AssetRef, BlockTimestampCache, FsKeyedStore, Inventory,
    InventoryService, Network, OpenSeaProvider, RpcBlockReader,
};

#[derive(Parser)]
#[command(
    name = "chaindata",
    version,
    about = "Wallet remote-data fetcher with durable caching",
    long_about = "Fetches NFT inventories, collection stats and block timestamps from remote\n\
                  providers, caching results per (owner, network) / (network, block) key and\n\
                  merging partial responses with previously cached data."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cache directory (default: platform cache dir or CHAINDATA_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Print cache/fetch counters to stderr after the command
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// NFT inventory for a wallet on one network
    Nfts {
        /// Owner address (0x-prefixed hex)
        #[arg(long)]
        owner: String,

        /// Network to query
        #[arg(long, default_value = "mainnet")]
        network: Network,
    },

    /// Aggregate stats for an NFT collection
    Stats {
        /// Collection slug as known to the indexer
        #[arg(long)]
        slug: String,

        #[arg(long, default_value = "mainnet")]
        network: Network,
    },

    /// Image URL for a single asset
    Image {
        /// Asset contract address
        #[arg(long)]
        contract: String,

        /// Token id within the contract
        #[arg(long)]
        token_id: String,

        #[arg(long, default_value = "mainnet")]
        network: Network,
    },

    /// Timestamp of a block
    Timestamp {
        /// Block number
        #[arg(long)]
        block: u64,

        #[arg(long, default_value = "mainnet")]
        network: Network,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "chaindata=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn inventory_service(cache_dir: &PathBuf) -> Result<InventoryService> {
    let store: FsKeyedStore<Inventory> = FsKeyedStore::open(cache_dir, "inventory")?;
    Ok(InventoryService::new(
        Arc::new(OpenSeaProvider::new()),
        Arc::new(store),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cache_dir = cli.cache_dir.unwrap_or_else(default_cache_dir);

    match cli.command {
        Commands::Nfts { owner, network } => {
            let owner: Address = owner
                .parse()
                .map_err(|e| anyhow!("invalid owner address: {}", e))?;
            let service = inventory_service(&cache_dir)?;

            let inventory = service.non_fungibles(owner, network).await?;
            println!("{}", serde_json::to_string_pretty(&inventory)?);

            if cli.verbose {
                eprintln!("{}", service.metrics().snapshot().format_report());
            }
        }

        Commands::Stats { slug, network } => {
            let service = inventory_service(&cache_dir)?;
            let stats = service.collection_stats(&slug, network).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::Image {
            contract,
            token_id,
            network,
        } => {
            let contract: Address = contract
                .parse()
                .map_err(|e| anyhow!("invalid contract address: {}", e))?;
            let service = inventory_service(&cache_dir)?;

            let url = service
                .asset_image_url(&AssetRef::new(contract, token_id), network)
                .await?;
            println!("{}", url);
        }

        Commands::Timestamp { block, network } => {
            let cache = BlockTimestampCache::new(Arc::new(RpcBlockReader::new()));
            let timestamp = cache.block_timestamp(network, block).await?;
            println!("{}", timestamp.to_rfc3339());
        }
    }

    Ok(())
}
