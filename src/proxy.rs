//! Read-through composition of the local cache and the backing store.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::ReadThroughCache;
use crate::error::{ProxyError, Result};
use crate::store::BackingStore;

/// Where a value was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Store,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Cache => write!(f, "Cache"),
            Source::Store => write!(f, "Store"),
        }
    }
}

/// A successfully resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub value: String,
    pub source: Source,
}

// == Read-Through Proxy ==
/// Serves keys from the cache, falling back to the backing store on a miss
/// and caching whatever the store returns.
#[derive(Clone)]
pub struct ReadThroughProxy {
    cache: Arc<ReadThroughCache>,
    store: Arc<dyn BackingStore>,
    store_timeout: Duration,
}

impl ReadThroughProxy {
    pub fn new(
        cache: Arc<ReadThroughCache>,
        store: Arc<dyn BackingStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            store_timeout,
        }
    }

    pub fn cache(&self) -> &Arc<ReadThroughCache> {
        &self.cache
    }

    // == Fetch ==
    /// Resolves `key`.
    ///
    /// Cache hit: returned without touching the store. Miss: the store is
    /// queried with no cache lock held; a found value is populated before it
    /// is returned. A store failure is logged and reported as `KeyNotFound`,
    /// the same outcome as a confirmed absence.
    pub async fn fetch(&self, key: &str) -> Result<Fetched> {
        if let Some(value) = self.cache.lookup(key).await {
            return Ok(Fetched {
                value,
                source: Source::Cache,
            });
        }

        match self.get_from_store(key).await {
            Ok(Some(value)) => {
                self.cache.populate(key, value.clone()).await;
                debug!(key = %key, "populated cache from store");
                Ok(Fetched {
                    value,
                    source: Source::Store,
                })
            }
            Ok(None) => Err(ProxyError::KeyNotFound(key.to_string())),
            Err(err) => {
                warn!(key = %key, error = %err, "backing store lookup failed, reporting key as not found");
                Err(ProxyError::KeyNotFound(key.to_string()))
            }
        }
    }

    /// Store round-trip bounded by the configured timeout.
    async fn get_from_store(&self, key: &str) -> Result<Option<String>> {
        match tokio::time::timeout(self.store_timeout, self.store.get(key)).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::StoreUnavailable(format!(
                "no response within {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }
}
