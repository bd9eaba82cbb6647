//! API Routes
//!
//! Configures the Axum router for the proxy.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, method_not_allowed, proxy_handler, stats_handler, AppState,
};

/// Creates the main router.
///
/// The two operational routes are matched first; every other path and method
/// goes to the proxy handler, which takes the last path segment as the key.
/// Non-GET requests on the operational routes get the same JSON 405 as
/// everywhere else.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/_proxy/health",
            get(health_handler).fallback(method_not_allowed),
        )
        .route(
            "/_proxy/stats",
            get(stats_handler).fallback(method_not_allowed),
        )
        .fallback(proxy_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
