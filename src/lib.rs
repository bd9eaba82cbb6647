//! Redis Proxy - A read-through caching HTTP proxy
//!
//! Serves `GET /<key>` from a bounded local cache with TTL freshness and LRU
//! eviction, falling back to a backing Redis instance on a miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod store;

pub use api::AppState;
pub use cache::ReadThroughCache;
pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::{Fetched, ReadThroughProxy, Source};
pub use store::{BackingStore, MemoryStore, RedisStore};
