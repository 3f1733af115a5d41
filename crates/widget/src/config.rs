//! Widget configuration.
//!
//! The grid page embeds its configuration as JSON inside
//! `<script type="application/json" id="coursegrid-config">`. Hosts may also
//! build a [`WidgetConfig`] directly.

use std::time::Duration;

use coursegrid_sdk::CONFIG_ELEMENT_ID;
use coursegrid_sdk::types::DEFAULT_PER_PAGE;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Default quiet period before a facet change reloads.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default upper bound on skeleton cards.
pub const DEFAULT_SKELETON_CAP: u32 = 6;

/// Explicit widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WidgetConfig {
    /// Listing endpoint URL.
    pub endpoint: Url,

    /// Request nonce, sent back unmodified.
    #[serde(default)]
    pub nonce: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_skeleton_cap")]
    pub skeleton_cap: u32,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_skeleton_cap() -> u32 {
    DEFAULT_SKELETON_CAP
}

impl WidgetConfig {
    /// Configuration with defaults for everything but the endpoint and nonce.
    pub fn new(endpoint: Url, nonce: impl Into<String>) -> Self {
        Self {
            endpoint,
            nonce: nonce.into(),
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            skeleton_cap: DEFAULT_SKELETON_CAP,
        }
    }

    /// Decode a JSON configuration blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.per_page == 0 {
            config.per_page = DEFAULT_PER_PAGE;
        }
        Ok(config)
    }

    /// Extract and decode the configuration embedded in a grid page.
    pub fn from_page(html: &str) -> Result<Self, ConfigError> {
        let marker = format!("id=\"{CONFIG_ELEMENT_ID}\"");
        let tag_start = html.find(&marker).ok_or(ConfigError::Missing)?;
        let rest = &html[tag_start..];
        let body_start = rest.find('>').ok_or(ConfigError::Missing)? + 1;
        let body = &rest[body_start..];
        let body_end = body.find("</script>").ok_or(ConfigError::Missing)?;
        Self::from_json(body[..body_end].trim())
    }

    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Skeleton cards to show while a page loads.
    pub fn skeleton_count(&self) -> u32 {
        self.per_page.min(self.skeleton_cap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = WidgetConfig::from_json(r#"{"endpoint": "http://h/courses"}"#).unwrap();
        assert_eq!(config.per_page, 12);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.skeleton_count(), 6);
        assert!(config.nonce.is_empty());
    }

    #[test]
    fn skeleton_count_follows_small_pages() {
        let mut config = WidgetConfig::new(Url::parse("http://h/courses").unwrap(), "n");
        config.per_page = 4;
        assert_eq!(config.skeleton_count(), 4);
    }

    #[test]
    fn reads_embedded_page_config() {
        let html = r#"<div></div>
<script type="application/json" id="coursegrid-config">{"endpoint":"http:\/\/h\/courses","nonce":"abc","per_page":9,"debounce_ms":150,"skeleton_cap":6}</script>"#;
        let config = WidgetConfig::from_page(html).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://h/courses");
        assert_eq!(config.nonce, "abc");
        assert_eq!(config.per_page, 9);
        assert_eq!(config.debounce_ms, 150);
    }

    #[test]
    fn missing_or_broken_config() {
        assert!(matches!(
            WidgetConfig::from_page("<p>nothing</p>"),
            Err(ConfigError::Missing)
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"endpoint": 5}"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
