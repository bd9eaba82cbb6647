//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::proxy::Fetched;

// == Value Response ==
/// Plain-text body for a resolved key:
///
/// ```text
/// <value>
/// Returned from Cache
/// ```
impl IntoResponse for Fetched {
    fn into_response(self) -> Response {
        let body = format!("{}\nReturned from {}", self.value, self.source);
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// Response body for the stats endpoint (GET /_proxy/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (stale lookups included)
    pub misses: u64,
    /// Lookups that found a stale entry
    pub stale: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Configured cache capacity
    pub capacity: usize,
    /// Configured freshness window in seconds
    pub freshness_window_secs: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stale: stats.stale,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
            freshness_window_secs: stats.freshness_window_secs,
        }
    }
}

/// Response body for the health endpoint (GET /_proxy/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
