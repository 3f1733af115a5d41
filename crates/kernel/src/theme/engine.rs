//! Theme engine with Tera templates.

use anyhow::{Context, Result};
use coursegrid_sdk::CONFIG_ELEMENT_ID;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

use crate::models::Term;

/// Template for the grid page scaffold.
pub const GRID_TEMPLATE: &str = "grid.html";

/// Widget configuration embedded in the grid page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedConfig {
    /// Absolute URL of the listing endpoint.
    pub endpoint: String,
    /// Request nonce the widget must send back.
    pub nonce: String,
    pub per_page: u32,
    pub debounce_ms: u64,
    pub skeleton_cap: u32,
}

/// Data for the grid page scaffold.
#[derive(Debug, Clone)]
pub struct GridPage {
    pub categories: Vec<Term>,
    pub tags: Vec<Term>,
    pub per_page: u32,
    pub columns: u32,
    pub config: EmbeddedConfig,
}

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(GRID_TEMPLATE, include_str!("../../templates/grid.html"))
            .context("failed to parse grid template")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Render the grid page scaffold.
    pub fn render_grid(&self, page: &GridPage) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("categories", &page.categories);
        context.insert("tags", &page.tags);
        context.insert("per_page", &page.per_page);
        context.insert("columns", &page.columns);
        context.insert("config_id", CONFIG_ELEMENT_ID);
        context.insert("config_json", &script_safe_json(&page.config)?);

        self.tera
            .render(GRID_TEMPLATE, &context)
            .context("failed to render grid template")
    }
}

/// Serialize a value for embedding inside a `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("failed to serialize widget config")?;
    Ok(json.replace("</", "<\\/"))
}
