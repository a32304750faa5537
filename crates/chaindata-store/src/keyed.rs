//! Keyed store trait and implementations.
//!
//! A `KeyedStore` is a durable mapping from a composite request key to the
//! last-known-good value for that key. Readers always receive clones; the
//! stored value is never handed out by reference, so cache state cannot be
//! mutated outside the write path.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::CacheMetrics;
use crate::paths::{atomic_write_json, entry_path, sanitize_key};

/// Stable, filesystem-safe identity for a request key.
pub trait StoreKey {
    fn storage_key(&self) -> String;
}

/// Durable mapping from request key to last-known-good value.
///
/// Write is last-writer-wins at key granularity. The store knows nothing
/// about merge policy; callers persist already-reconciled values.
pub trait KeyedStore<K: StoreKey, V>: Send + Sync {
    /// Last persisted value for the key, if any.
    fn read(&self, key: &K) -> Result<Option<V>>;

    /// Persist a value for the key, replacing any previous one.
    fn write(&self, key: &K, value: &V) -> Result<()>;

    /// Whole-store eviction.
    fn clear(&self) -> Result<()>;
}

/// Filesystem-backed store: one JSON file per key in a sharded layout, with
/// a write-through in-memory layer so repeated reads stay off disk.
pub struct FsKeyedStore<V> {
    root: PathBuf,
    namespace: &'static str,
    memory: RwLock<HashMap<String, V>>,
    metrics: CacheMetrics,
}

impl<V> FsKeyedStore<V>
where
    V: DeserializeOwned,
{
    /// Open (or create) a store rooted at `root`, namespaced by data kind
    /// (e.g. "inventory"). Existing entries are loaded into memory.
    pub fn open(root: impl AsRef<Path>, namespace: &'static str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join(namespace))
            .map_err(|e| anyhow!("Failed to create store root {}: {}", root.display(), e))?;
        let store = Self {
            root,
            namespace,
            memory: RwLock::new(HashMap::new()),
            metrics: CacheMetrics::new(),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Counters for this store's lookups.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn path_for(&self, storage_key: &str) -> PathBuf {
        entry_path(&self.root, self.namespace, storage_key)
    }

    /// Load every persisted entry into the memory layer. Entries that fail
    /// to parse are skipped, not fatal; the next write replaces them.
    fn load_from_disk(&self) -> Result<()> {
        let dir = self.root.join(self.namespace);
        let mut memory = self.memory.write();
        for shard in std::fs::read_dir(&dir)
            .map_err(|e| anyhow!("Failed to list store {}: {}", dir.display(), e))?
        {
            let shard = shard?.path();
            if !shard.is_dir() {
                continue;
            }
            for entry in std::fs::read_dir(&shard)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match std::fs::read_to_string(&path)
                    .map_err(anyhow::Error::from)
                    .and_then(|json| serde_json::from_str::<V>(&json).map_err(Into::into))
                {
                    Ok(value) => {
                        memory.insert(stem.to_string(), value);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), "skipping unreadable cache entry: {e:#}");
                    }
                }
            }
        }
        Ok(())
    }
}

impl<K, V> KeyedStore<K, V> for FsKeyedStore<V>
where
    K: StoreKey + Send + Sync,
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn read(&self, key: &K) -> Result<Option<V>> {
        // Memory entries are keyed by the sanitized form, matching file stems.
        let storage_key = sanitize_key(&key.storage_key());

        if let Some(value) = self.memory.read().get(&storage_key) {
            self.metrics.record_memory_hit();
            return Ok(Some(value.clone()));
        }

        let path = self.path_for(&storage_key);
        if !path.exists() {
            self.metrics.record_miss();
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read entry {}: {}", path.display(), e))?;
        let value: V = serde_json::from_str(&json)
            .map_err(|e| anyhow!("Failed to parse entry {}: {}", path.display(), e))?;

        self.metrics.record_disk_hit();
        self.memory.write().insert(storage_key, value.clone());
        Ok(Some(value))
    }

    fn write(&self, key: &K, value: &V) -> Result<()> {
        let storage_key = sanitize_key(&key.storage_key());
        let path = self.path_for(&storage_key);

        atomic_write_json(&path, value)?;
        self.memory.write().insert(storage_key.clone(), value.clone());

        debug!(namespace = self.namespace, key = %storage_key, "persisted entry");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let dir = self.root.join(self.namespace);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .map_err(|e| anyhow!("Failed to clear store {}: {}", dir.display(), e))?;
        }
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow!("Failed to recreate store {}: {}", dir.display(), e))?;
        self.memory.write().clear();
        Ok(())
    }
}

/// In-memory store with the same contract, for tests.
pub struct MemoryKeyedStore<K, V> {
    entries: RwLock<HashMap<String, V>>,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> MemoryKeyedStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V> Default for MemoryKeyedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for MemoryKeyedStore<K, V>
where
    K: StoreKey + Send + Sync,
    V: Clone + Send + Sync,
{
    fn read(&self, key: &K) -> Result<Option<V>> {
        Ok(self.entries.read().get(&key.storage_key()).cloned())
    }

    fn write(&self, key: &K, value: &V) -> Result<()> {
        self.entries
            .write()
            .insert(key.storage_key(), value.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }
}
