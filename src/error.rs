//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Invalid startup configuration (fatal)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure reaching the backing store
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The backing store confirmed the key does not exist
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Only GET is served
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl ProxyError {
    /// HTTP status this error is reported with.
    ///
    /// `StoreUnavailable` shares the not-found status: an unreachable store
    /// is indistinguishable from a missing key to clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::StoreUnavailable(_) => StatusCode::NOT_FOUND,
            ProxyError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<redis::RedisError> for ProxyError {
    fn from(err: redis::RedisError) -> Self {
        ProxyError::StoreUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ProxyError::KeyNotFound(key) => {
                format!("Sorry, given key '{}' does not exist.", key)
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
