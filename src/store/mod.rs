//! Backing Store Module
//!
//! The remote key-value service of record, reached through a single `get`.

mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

// == Backing Store ==
/// Read-only view of the backing key-value store.
///
/// `Ok(Some(value))` when the key exists, `Ok(None)` when the store confirms
/// it does not, and `Err(ProxyError::StoreUnavailable)` on transport failure.
#[async_trait]
pub trait BackingStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
}
