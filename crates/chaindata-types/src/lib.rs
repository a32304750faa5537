//! Domain types shared across the chaindata workspace.
//!
//! This crate is the canonical source for addresses, network identifiers,
//! NFT inventory types and the fetch error taxonomy. Other crates should
//! import from here rather than defining their own variants.

pub mod address;
pub mod assets;
pub mod env;
pub mod error;
pub mod network;

pub use address::{Address, AddressParseError};
pub use assets::{AssetRef, CollectionStats, Inventory, NonFungible};
pub use error::FetchError;
pub use network::Network;
