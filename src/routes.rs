//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - API status (public)
//! - `GET  /health`  - Health check: database (public)
//! - `/v1/*`         - REST API (see [`crate::api::routes`])
//! - anything else   - `404 NotFoundError` echoing method and URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token, plus role check on admin routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, root_handler};
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = rate_limit::apply(api::routes::public_routes(), RateLimit::PUBLIC, behind_proxy);
    let secured = rate_limit::apply(
        api::routes::secured_routes(&state),
        RateLimit::SECURE,
        behind_proxy,
    );

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/v1", public.merge(secured))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
