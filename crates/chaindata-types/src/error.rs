//! Fetch error taxonomy.
//!
//! Settled outcomes are broadcast to every caller joined on an in-flight
//! request, so the error must be `Clone`; payloads are rendered messages
//! rather than source errors for that reason.
//!
//! An unsupported network is deliberately absent here: it resolves locally
//! to an empty result and is never surfaced as an error.

use thiserror::Error;

use crate::network::Network;

/// Failure of a remote fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network or parse error from the remote source. The previous cached
    /// value, if any, is left untouched.
    #[error("provider request failed: {0}")]
    Provider(String),

    /// No client could be constructed for the target network
    /// (missing endpoint, bad configuration). Fails fast, no retry.
    #[error("no client available for {network}: {reason}")]
    Configuration { network: Network, reason: String },

    /// The durable store failed to read or write.
    #[error("cache storage failure: {0}")]
    Storage(String),
}

impl FetchError {
    /// Provider failure from any displayable cause.
    pub fn provider(err: impl std::fmt::Display) -> Self {
        FetchError::Provider(err.to_string())
    }

    /// Configuration failure for a network.
    pub fn configuration(network: Network, reason: impl std::fmt::Display) -> Self {
        FetchError::Configuration {
            network,
            reason: reason.to_string(),
        }
    }

    /// Storage failure from any displayable cause.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        FetchError::Storage(err.to_string())
    }
}
