//! Redis backing store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::info;

use super::BackingStore;
use crate::error::{ProxyError, Result};

/// Backing store reached over a shared, auto-reconnecting Redis connection.
///
/// The connection is opened on the first `get`, so the proxy can start while
/// Redis is still down. A failed attempt leaves the cell empty and the next
/// request tries again.
pub struct RedisStore {
    client: Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Creates a store for `url` without connecting.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| {
            ProxyError::Configuration(format!("invalid store address '{}': {}", url, e))
        })?;

        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let manager = self.client.get_connection_manager().await?;
                info!("Connected to backing store");
                Ok::<_, ProxyError>(manager)
            })
            .await?;
        Ok(conn.clone())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("connected", &self.conn.initialized())
            .finish()
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }
}
