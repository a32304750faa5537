//! Path utilities for the sharded store layout.
//!
//! Entries live under `<root>/<namespace>/<shard>/<key>.json`, where the
//! shard is the first two characters of the sanitized storage key. Sharding
//! keeps directories small for wallets tracked across many networks.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Sanitize a storage key into a filesystem-safe file stem.
///
/// Storage keys are built from addresses, chain ids and block numbers, so
/// they are already mostly safe; this strips the `0x` prefix and replaces
/// anything outside `[a-z0-9._-]` with `_`.
pub fn sanitize_key(key: &str) -> String {
    let bare = key.strip_prefix("0x").unwrap_or(key).to_lowercase();
    bare.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Shard component for a sanitized key (first two characters, padded).
pub fn shard(sanitized: &str) -> String {
    let mut s: String = sanitized.chars().take(2).collect();
    while s.len() < 2 {
        s.push('_');
    }
    s
}

/// Full path for an entry file.
pub fn entry_path(root: &Path, namespace: &str, key: &str) -> PathBuf {
    let sanitized = sanitize_key(key);
    root.join(namespace)
        .join(shard(&sanitized))
        .join(format!("{}.json", sanitized))
}

/// Ensure all parent directories exist for a path.
pub fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Write a file atomically (write to .tmp, then rename).
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent_dirs(path)?;
    let tmp_path = path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|s| s.to_str()).unwrap_or("tmp")
    ));
    std::fs::write(&tmp_path, contents)
        .map_err(|e| anyhow!("Failed to write temp file {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        anyhow!(
            "Failed to rename {} to {}: {}",
            tmp_path.display(),
            path.display(),
            e
        )
    })?;
    Ok(())
}

/// Write a JSON file atomically (compact format).
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec(value).map_err(|e| anyhow!("Failed to serialize JSON: {}", e))?;
    atomic_write(path, &json)
}
