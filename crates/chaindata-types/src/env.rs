//! Environment variable parsing utilities.
//!
//! Endpoint overrides and cache-dir configuration all come from the
//! environment; this module centralizes the parse-with-default boilerplate.
//!
//! # Example
//!
//! ```
//! use chaindata_types::env::{env_string_or, env_var_or};
//!
//! let timeout_ms: u64 = env_var_or("CHAINDATA_HTTP_TIMEOUT_MS", 6000);
//! let endpoint = env_string_or("CHAINDATA_INDEXER_URL", "https://api.opensea.io");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Get an environment variable as a string with a default value.
pub fn env_string_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check if an environment variable is set to a truthy value
/// ("1", "true", "yes", "on", case-insensitive).
pub fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("CHAINDATA_TEST_U64", "42");
        let val: Option<u64> = env_var("CHAINDATA_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("CHAINDATA_TEST_MISSING_1");
        assert_eq!(missing, None);

        std::env::remove_var("CHAINDATA_TEST_U64");
    }

    #[test]
    fn test_env_var_or_default() {
        let val: u64 = env_var_or("CHAINDATA_TEST_MISSING_2", 6000);
        assert_eq!(val, 6000);
    }

    #[test]
    fn test_env_string_or() {
        std::env::set_var("CHAINDATA_TEST_STRING", "hello");
        assert_eq!(env_string_or("CHAINDATA_TEST_STRING", "default"), "hello");
        assert_eq!(
            env_string_or("CHAINDATA_TEST_MISSING_3", "default"),
            "default"
        );
        std::env::remove_var("CHAINDATA_TEST_STRING");
    }

    #[test]
    fn test_env_bool() {
        std::env::set_var("CHAINDATA_TEST_BOOL", "YES");
        assert!(env_bool("CHAINDATA_TEST_BOOL"));
        std::env::set_var("CHAINDATA_TEST_BOOL", "false");
        assert!(!env_bool("CHAINDATA_TEST_BOOL"));
        assert!(!env_bool("CHAINDATA_TEST_MISSING_4"));
        std::env::remove_var("CHAINDATA_TEST_BOOL");
    }
}
