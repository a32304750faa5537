//! Keyed fetch-cache-merge orchestration for wallet remote data.
//!
//! This crate is the core of the workspace: it coordinates unreliable,
//! rate-limited remote sources behind a caching protocol that never lets a
//! partial response erase known-good data.
//!
//! Control flow for every exposed operation:
//!
//! ```text
//! caller -> InFlightRegistry::acquire_or_join(key)
//!            |- pending fetch for key: join it, no new remote call
//!            '- otherwise: provider fetch -> reconcile(previous, outcome)
//!               -> store write -> resolve to all waiters
//! ```
//!
//! # Example
//!
//! ```ignore
//! use chaindata_fetcher::{InventoryService, OpenSeaProvider};
//!
//! let service = InventoryService::new(provider, store);
//! let inventory = service.non_fungibles(owner, Network::Mainnet).await?;
//! ```

pub mod inflight;
pub mod inventory;
pub mod key;
pub mod merge;
pub mod provider;
pub mod remote;
pub mod timestamp;

pub use inflight::InFlightRegistry;
pub use inventory::InventoryService;
pub use key::{AssetKey, BlockKey, InventoryKey, StatsKey};
pub use merge::reconcile_inventory;
pub use provider::{BlockReader, FetchOutcome, InventoryProvider};
pub use remote::{OpenSeaProvider, RpcBlockReader};
pub use timestamp::BlockTimestampCache;
