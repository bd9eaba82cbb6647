//! Cache Module
//!
//! Provides the bounded local cache with freshness-window expiry and LRU
//! eviction.

mod entry;
mod lru;
mod read_through;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use read_through::ReadThroughCache;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
