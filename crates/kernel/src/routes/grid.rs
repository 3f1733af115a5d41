//! Grid page scaffold.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::error::AppResult;
use crate::listing::params::parse_positive;
use crate::models::Taxonomy;
use crate::security::LISTING_ACTION;
use crate::state::AppState;
use crate::theme::{EmbeddedConfig, GridPage};

/// Quiet period before a facet change reloads the grid.
const DEBOUNCE_MS: u64 = 300;

/// Most skeleton cards shown while loading.
const SKELETON_CAP: u32 = 6;

/// Widest grid the scaffold lays out.
const MAX_COLUMNS: u32 = 6;

/// `GET /grid`: facet sidebar, empty card container and widget config.
///
/// `per_page` and `columns` query values override the configured defaults;
/// both are clamped to their maximums.
async fn grid_page(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> AppResult<Html<String>> {
    let config = state.config();
    let limits = config.listing_limits();

    let per_page = raw
        .get("per_page")
        .and_then(|v| parse_positive(v))
        .unwrap_or(limits.default_per_page)
        .min(limits.max_per_page);
    let columns = raw
        .get("columns")
        .and_then(|v| parse_positive(v))
        .unwrap_or(config.grid_columns)
        .clamp(1, MAX_COLUMNS);

    let (categories, tags) = tokio::try_join!(
        state.store().terms(Taxonomy::Category),
        state.store().terms(Taxonomy::Tag),
    )?;

    let page = GridPage {
        categories,
        tags,
        per_page,
        columns,
        config: EmbeddedConfig {
            endpoint: format!("{}/courses", config.site_url.trim_end_matches('/')),
            nonce: state.nonces().issue(LISTING_ACTION),
            per_page,
            debounce_ms: DEBOUNCE_MS,
            skeleton_cap: SKELETON_CAP,
        },
    };

    Ok(Html(state.theme().render_grid(&page)?))
}

/// Create the grid page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/grid", get(grid_page))
}
