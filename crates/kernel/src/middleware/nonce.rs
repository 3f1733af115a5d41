//! Request nonce middleware.
//!
//! Rejects listing requests that do not carry a valid `X-Grid-Nonce` header
//! before the handler runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use coursegrid_sdk::NONCE_HEADER;

use crate::error::AppError;
use crate::security::LISTING_ACTION;
use crate::state::AppState;

/// Middleware that requires a valid listing nonce.
pub async fn require_nonce(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let nonce = request
        .headers()
        .get(NONCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !state.nonces().verify(LISTING_ACTION, nonce) {
        tracing::debug!(
            path = %request.uri().path(),
            present = !nonce.is_empty(),
            "rejected request nonce"
        );
        return AppError::Forbidden.into_response();
    }

    next.run(request).await
}
