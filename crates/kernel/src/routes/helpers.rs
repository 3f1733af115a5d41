//! Shared route helpers.

use axum::http::{HeaderMap, header};
use subtle::ConstantTimeEq;

use crate::state::AppState;

/// Whether the caller may see debug diagnostics.
///
/// Requires a non-production environment and `Authorization: Bearer` with
/// the configured admin token. Without a configured token nobody qualifies.
pub fn is_privileged(state: &AppState, headers: &HeaderMap) -> bool {
    let config = state.config();
    if config.is_production() {
        return false;
    }
    let Some(expected) = config.admin_token.as_deref() else {
        return false;
    };

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| bool::from(token.as_bytes().ct_eq(expected.as_bytes())))
}
