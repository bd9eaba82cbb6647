//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with freshness support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value and the moment it was inserted.
///
/// Entries are immutable once created; a later populate for the same key
/// replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached key
    pub key: String,
    /// The cached value
    pub value: String,
    /// When the value was fetched from the backing store
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(key: String, value: String, inserted_at: Instant) -> Self {
        Self {
            key,
            value,
            inserted_at,
        }
    }

    // == Age ==
    /// Time elapsed since insertion, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals the window is stale, so
    /// a zero window makes every entry stale.
    pub fn is_fresh(&self, window: Duration, now: Instant) -> bool {
        self.age(now) < window
    }
}
