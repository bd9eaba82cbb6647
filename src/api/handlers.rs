//! API Handlers
//!
//! HTTP request handlers for the proxy and its operational endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, Uri},
    Json,
};

use crate::cache::ReadThroughCache;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, StatsResponse};
use crate::proxy::{Fetched, ReadThroughProxy};
use crate::store::BackingStore;

/// Application state shared across all handlers.
///
/// Holds the one cache instance created at startup; every request task works
/// against it through the proxy.
#[derive(Clone)]
pub struct AppState {
    pub proxy: ReadThroughProxy,
}

impl AppState {
    pub fn new(proxy: ReadThroughProxy) -> Self {
        Self { proxy }
    }

    /// Builds the cache from `config` and wires it to `store`.
    ///
    /// Fails with `ProxyError::Configuration` on an invalid capacity.
    pub fn from_config(config: &Config, store: Arc<dyn BackingStore>) -> Result<Self> {
        let cache = ReadThroughCache::new(config.capacity, config.freshness_window())?;
        Ok(Self::new(ReadThroughProxy::new(
            Arc::new(cache),
            store,
            config.store_timeout(),
        )))
    }
}

// == Key Extraction ==
/// Percent-decoded last non-empty segment of the request path.
///
/// Trailing slashes are ignored, so `/sf/` names `sf`; `/` yields the empty
/// key. Decoding happens after splitting, so an encoded `%2F` stays inside
/// the key. Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn key_from_path(path: &str) -> String {
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let bytes = urlencoding::decode_binary(segment.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Handler for GET /<key>
///
/// Any path not claimed by another route lands here. Non-GET methods are
/// rejected before the cache is consulted.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Fetched> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed(method.to_string()));
    }

    let key = key_from_path(uri.path());
    state.proxy.fetch(&key).await
}

/// Method fallback for the operational routes, so every 405 carries the
/// same JSON error body as the proxy handler's.
pub async fn method_not_allowed(method: Method) -> ProxyError {
    ProxyError::MethodNotAllowed(method.to_string())
}

/// Handler for GET /_proxy/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.proxy.cache().stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /_proxy/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
