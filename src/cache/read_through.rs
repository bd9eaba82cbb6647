//! Read-Through Cache Module
//!
//! Shared, lock-protected handle over `CacheStore`.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Lookup};
use crate::error::Result;

// == Read-Through Cache ==
/// Cache handle shared by every request task.
///
/// One mutex guards the whole store: the entry map, the recency order and the
/// statistics. Both `lookup` and `populate` mutate recency, so they are
/// serialized against each other. Callers must not hold the lock across a
/// backing-store call; no method here exposes the guard.
#[derive(Debug)]
pub struct ReadThroughCache {
    inner: Mutex<CacheStore>,
}

impl ReadThroughCache {
    // == Constructor ==
    /// Creates a new cache; rejects a zero capacity.
    pub fn new(capacity: usize, freshness_window: Duration) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::new(capacity, freshness_window)?),
        })
    }

    // == Lookup ==
    /// Returns the cached value if a fresh entry exists.
    pub async fn lookup(&self, key: &str) -> Option<String> {
        self.inspect(key).await.into_value()
    }

    /// Like `lookup`, but distinguishes stale entries from absent ones.
    pub async fn inspect(&self, key: &str) -> Lookup {
        let result = {
            let mut store = self.inner.lock().await;
            store.lookup(key, Instant::now())
        };

        match &result {
            Lookup::Hit(_) => debug!(key = %key, "cache hit"),
            Lookup::Stale => debug!(key = %key, "cache entry stale"),
            Lookup::Miss => debug!(key = %key, "cache miss"),
        }
        result
    }

    // == Populate ==
    /// Inserts or replaces `key`, evicting the least recently used entry if
    /// the cache is full.
    pub async fn populate(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let evicted = {
            let mut store = self.inner.lock().await;
            store.populate(key.clone(), value.into(), Instant::now())
        };

        if let Some(evicted) = evicted {
            debug!(key = %key, evicted = %evicted, "evicted least recently used entry");
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.contains(key)
    }
}
