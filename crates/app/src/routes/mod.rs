//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # App Proxy (signed by Shopify)
//! GET  /api/proxy/settings     - Redirect target for the storefront script
//!
//! # Admin (Shopify session token)
//! GET  /api/redirect-setting   - Current setting for the shop
//! POST /api/redirect-setting   - Save setting (form: redirectUrl, isEnabled)
//! ```

pub mod admin;
pub mod health;
pub mod proxy;

use axum::{Router, http::Request, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the App Proxy routes router.
pub fn proxy_routes() -> Router<AppState> {
    Router::new().route("/settings", get(proxy::settings))
}

/// Create all routes for the app.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/proxy", proxy_routes())
        .route(
            "/api/redirect-setting",
            get(admin::show).post(admin::save),
        )
}

/// Build the application with its middleware stack and state.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
