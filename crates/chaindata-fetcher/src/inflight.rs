//! Per-key deduplication of concurrent fetches.
//!
//! At most one live remote call exists per key at any instant. The first
//! caller for a key starts the fetch; every caller arriving while it is
//! outstanding joins the same shared future and observes the identical
//! resolved value or error. The pending entry removes itself when the fetch
//! settles, before the value resolves to callers, so a later request starts
//! a fresh fetch.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::trace;

use chaindata_store::CacheMetrics;
use chaindata_types::FetchError;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, FetchError>>>;
type PendingMap<K, V> = Mutex<HashMap<K, SharedFetch<V>>>;

/// Registry of in-flight fetches, one slot per key.
pub struct InFlightRegistry<K, V> {
    pending: Arc<PendingMap<K, V>>,
    metrics: CacheMetrics,
}

impl<K, V> InFlightRegistry<K, V> {
    pub fn new() -> Self {
        Self::with_metrics(CacheMetrics::new())
    }

    /// Registry that records fetch/join counts on shared metrics.
    pub fn with_metrics(metrics: CacheMetrics) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            metrics,
        }
    }
}

impl<K, V> Default for InFlightRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InFlightRegistry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Number of fetches currently outstanding.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Join the pending fetch for `key`, or start one with `fetch`.
    ///
    /// The check-then-insert runs under a single lock, so two concurrent
    /// first callers cannot both start a fetch. `fetch` is only invoked to
    /// construct the future; it does not run until the shared future is
    /// polled.
    pub async fn acquire_or_join<F, Fut>(&self, key: K, fetch: F) -> Result<V, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock();
            if let Some(existing) = pending.get(&key) {
                trace!("joining in-flight fetch");
                self.metrics.record_inflight_join();
                existing.clone()
            } else {
                self.metrics.record_remote_fetch();
                let pending_map = Arc::clone(&self.pending);
                let settle_key = key.clone();
                let fut = fetch();
                // The entry removes itself once the fetch settles, before any
                // waiter observes the result.
                let shared = async move {
                    let outcome = fut.await;
                    pending_map.lock().remove(&settle_key);
                    outcome
                }
                .boxed()
                .shared();
                pending.insert(key, shared.clone());
                shared
            }
        };

        shared.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let registry: InFlightRegistry<u64, u64> = InFlightRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let fetch = |calls: Arc<AtomicUsize>, release: Arc<Notify>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                release.notified().await;
                Ok(7u64)
            }
        };

        let release_task = {
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                // Runs once the joined callers are all pending.
                release.notify_waiters();
            })
        };

        let (a, b, c) = tokio::join!(
            registry.acquire_or_join(1, fetch(Arc::clone(&calls), Arc::clone(&release))),
            registry.acquire_or_join(1, fetch(Arc::clone(&calls), Arc::clone(&release))),
            registry.acquire_or_join(1, fetch(Arc::clone(&calls), Arc::clone(&release))),
        );
        release_task.await.unwrap();

        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(c.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_entry_removed_after_settle() {
        let registry: InFlightRegistry<u64, u64> = InFlightRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            let value = registry
                .acquire_or_join(1, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(9u64)
                })
                .await
                .unwrap();
            assert_eq!(value, 9);
        }

        // Sequential calls each get a fresh fetch.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(registry.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_broadcast_to_all_waiters() {
        let registry: InFlightRegistry<u64, u64> = InFlightRegistry::new();
        let release = Arc::new(Notify::new());

        let failing = |release: Arc<Notify>| {
            move || async move {
                release.notified().await;
                Err(FetchError::provider("boom"))
            }
        };

        let release_task = {
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                release.notify_waiters();
            })
        };

        let (a, b) = tokio::join!(
            registry.acquire_or_join(1, failing(Arc::clone(&release))),
            registry.acquire_or_join(1, failing(Arc::clone(&release))),
        );
        release_task.await.unwrap();

        assert_eq!(a.unwrap_err(), FetchError::provider("boom"));
        assert_eq!(b.unwrap_err(), FetchError::provider("boom"));
        assert_eq!(registry.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let registry: InFlightRegistry<u64, u64> = InFlightRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fetch = |calls: Arc<AtomicUsize>, value: u64| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(value)
            }
        };

        let (a, b) = tokio::join!(
            registry.acquire_or_join(1, fetch(Arc::clone(&calls), 10)),
            registry.acquire_or_join(2, fetch(Arc::clone(&calls), 20)),
        );

        assert_eq!(a.unwrap(), 10);
        assert_eq!(b.unwrap(), 20);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_metrics_count_joins() {
        let metrics = CacheMetrics::new();
        let registry: InFlightRegistry<u64, u64> =
            InFlightRegistry::with_metrics(metrics.clone());
        let release = Arc::new(Notify::new());

        let fetch = |release: Arc<Notify>| {
            move || async move {
                release.notified().await;
                Ok(1u64)
            }
        };

        let release_task = {
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                release.notify_waiters();
            })
        };

        let _ = tokio::join!(
            registry.acquire_or_join(1, fetch(Arc::clone(&release))),
            registry.acquire_or_join(1, fetch(Arc::clone(&release))),
            registry.acquire_or_join(1, fetch(Arc::clone(&release))),
        );
        release_task.await.unwrap();

        let snap = metrics.snapshot();
        assert_eq!(snap.remote_fetches, 1);
        assert_eq!(snap.inflight_joins, 2);
    }
}
