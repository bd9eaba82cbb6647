//! Cache Store Module
//!
//! Bounded cache engine combining HashMap storage with LRU tracking and a
//! freshness window. Not synchronized; see `ReadThroughCache` for the shared
//! handle.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{ProxyError, Result};

// == Lookup Result ==
/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fresh entry, served from cache
    Hit(String),
    /// Entry present but older than the freshness window
    Stale,
    /// No entry for the key
    Miss,
}

impl Lookup {
    /// Collapses the result to hit/miss.
    pub fn into_value(self) -> Option<String> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Stale | Lookup::Miss => None,
        }
    }
}

// == Cache Store ==
/// Capacity-bounded key/value map with LRU eviction and lazy expiry.
///
/// Stale entries are never removed by a lookup. They keep their slot until
/// the LRU policy evicts them or a populate for the same key replaces them.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    capacity: usize,
    freshness_window: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// Fails with `ProxyError::Configuration` when `capacity` is zero.
    pub fn new(capacity: usize, freshness_window: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(ProxyError::Configuration(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
            freshness_window,
        })
    }

    // == Lookup ==
    /// Looks up `key` as of `now`.
    ///
    /// A fresh hit is marked most recently used. Stale and missing keys leave
    /// the recency order untouched.
    pub fn lookup(&mut self, key: &str, now: Instant) -> Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.freshness_window, now) => {
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                Lookup::Hit(value)
            }
            Some(_) => {
                self.stats.record_stale();
                Lookup::Stale
            }
            None => {
                self.stats.record_miss();
                Lookup::Miss
            }
        }
    }

    // == Populate ==
    /// Inserts or replaces `key` with `inserted_at = now`.
    ///
    /// Replacing an existing key never changes the entry count. Inserting a
    /// new key into a full cache evicts the least recently used entry first.
    /// Returns the evicted key, if any.
    pub fn populate(&mut self, key: String, value: String, now: Instant) -> Option<String> {
        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        self.lru.touch(&key);
        self.entries
            .insert(key.clone(), CacheEntry::new(key, value, now));
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats.capacity = self.capacity();
        stats.set_freshness_window_secs(self.freshness_window().as_secs());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// True if `key` occupies a slot, fresh or stale.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.keys()
    }
}
