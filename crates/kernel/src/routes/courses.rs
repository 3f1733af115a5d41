//! Course listing endpoint.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use coursegrid_sdk::types::ListingResponse;
use coursegrid_sdk::{TOTAL_HEADER, TOTAL_PAGES_HEADER};

use super::helpers::is_privileged;
use crate::error::AppResult;
use crate::state::AppState;

/// `GET /courses`
async fn list_courses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<(HeaderMap, Json<ListingResponse>)> {
    let resolved = state.listing().resolve(&raw).await?;
    let mut response = resolved.response;

    if is_privileged(&state, &headers) {
        response.debug = Some(serde_json::json!({ "criteria": resolved.criteria }));
    }

    let mut out = HeaderMap::new();
    out.insert(
        HeaderName::from_static(TOTAL_HEADER),
        HeaderValue::from(response.total),
    );
    out.insert(
        HeaderName::from_static(TOTAL_PAGES_HEADER),
        HeaderValue::from(response.pages),
    );

    Ok((out, Json(response)))
}

/// Create the listing router. The nonce check is applied by the caller.
pub fn router() -> Router<AppState> {
    Router::new().route("/courses", get(list_courses))
}
