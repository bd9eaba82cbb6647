//! API Module
//!
//! HTTP handlers and routing for the proxy.
//!
//! # Endpoints
//! - `GET /<key>` - Resolve a key through the cache, falling back to the store
//! - `GET /_proxy/stats` - Cache statistics
//! - `GET /_proxy/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
