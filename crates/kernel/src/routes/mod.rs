//! HTTP route handlers.

pub mod courses;
pub mod grid;
pub mod health;
pub mod helpers;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use coursegrid_sdk::{NONCE_HEADER, TOTAL_HEADER, TOTAL_PAGES_HEADER};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::state::AppState;

/// Build the application router with all routes and layers.
pub fn app(state: AppState) -> Router {
    let cors = build_cors_layer(state.config());

    // Only the listing endpoint requires a nonce.
    let listing = courses::router().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        crate::middleware::require_nonce,
    ));

    Router::new()
        .merge(listing)
        .merge(grid::router())
        .merge(health::router())
        // Middleware layers (last added = first executed in request flow):
        // TraceLayer → CORS → routes
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::OPTIONS];
    let exposed = [
        HeaderName::from_static(TOTAL_HEADER),
        HeaderName::from_static(TOTAL_PAGES_HEADER),
    ];
    let allowed = [
        HeaderName::from_static(NONCE_HEADER),
        axum::http::header::ACCEPT,
        axum::http::header::AUTHORIZATION,
    ];

    if config.cors_allowed_origins.len() == 1 && config.cors_allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(allowed)
            .expose_headers(exposed)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(allowed)
            .expose_headers(exposed)
            .allow_credentials(true)
    }
}
