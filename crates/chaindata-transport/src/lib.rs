//! HTTP transport layer for wallet remote data.
//!
//! This crate provides blocking clients for the two remote sources the
//! orchestration layer consumes:
//! - [`IndexerClient`]: OpenSea-style NFT indexer (owner assets, collection
//!   stats, asset image URLs)
//! - [`RpcClient`]: JSON-RPC node access (block timestamps)
//!
//! Clients are blocking (`ureq`) by design; async callers drive them through
//! `tokio::task::spawn_blocking`, which happens in `chaindata-fetcher`.

pub mod endpoints;
pub mod indexer;
pub mod rpc;

pub use indexer::{AssetsFetch, IndexerClient};
pub use rpc::RpcClient;
