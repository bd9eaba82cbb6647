//! In-process backing store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BackingStore;
use crate::error::{ProxyError, Result};

/// HashMap-backed store for tests and local runs.
///
/// Can be switched into an unavailable state to simulate a store outage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
    gets: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-loaded with `pairs`.
    pub fn with_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
            ..Self::default()
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.data.write().await.insert(key.into(), value.into());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get` calls served, including failed ones.
    pub fn get_count(&self) -> u64 {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ProxyError::StoreUnavailable(
                "memory store marked unavailable".to_string(),
            ));
        }

        Ok(self.data.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get() {
        let store = MemoryStore::with_entries([("sf", "SanFrancisco")]);

        assert_eq!(store.get("sf").await.unwrap(), Some("SanFrancisco".to_string()));
        assert_eq!(store.get("hello").await.unwrap(), None);
        assert_eq!(store.get_count(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_set_overwrites() {
        let store = MemoryStore::new();

        store.set("ny", "NewYork").await;
        store.set("ny", "NYC").await;

        assert_eq!(store.get("ny").await.unwrap(), Some("NYC".to_string()));
    }

    #[tokio::test]
    async fn test_memory_store_unavailable() {
        let store = MemoryStore::with_entries([("sf", "SanFrancisco")]);
        store.set_unavailable(true);

        let result = store.get("sf").await;
        assert!(matches!(result, Err(ProxyError::StoreUnavailable(_))));

        store.set_unavailable(false);
        assert!(store.get("sf").await.unwrap().is_some());
    }
}
