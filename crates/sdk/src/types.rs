//! Core listing types.
//!
//! These are the shapes exchanged over `GET /courses`: the facet selections a
//! client sends, the page cursor, and the listing response it gets back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page used when the client sends none (or an invalid one).
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client sends none (or an invalid one).
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Recognized facet keys.
pub mod facet {
    /// Category slug or comma-joined slugs.
    pub const CATEGORY: &str = "category";
    /// Tag slug or comma-joined slugs.
    pub const TAG: &str = "tag";
    /// `"free"` or `"paid"`.
    pub const PRICE: &str = "price";

    /// All facets the listing endpoint understands.
    pub const ALL: [&str; 3] = [CATEGORY, TAG, PRICE];
}

/// Facet selections keyed by facet identifier.
///
/// Empty values are never stored, so an absent facet and a cleared facet
/// look the same on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterParams {
    entries: BTreeMap<String, String>,
}

impl FilterParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a facet value. Empty values remove the facet instead.
    pub fn insert(&mut self, facet: impl Into<String>, value: impl Into<String>) {
        let facet = facet.into();
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(&facet);
        } else {
            self.entries.insert(facet, value);
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, facet: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(facet, value);
        self
    }

    /// Value for a facet, if one is selected.
    pub fn get(&self, facet: &str) -> Option<&str> {
        self.entries.get(facet).map(String::as_str)
    }

    /// Remove a facet selection.
    pub fn remove(&mut self, facet: &str) -> Option<String> {
        self.entries.remove(facet)
    }

    /// Iterate selections in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of selected facets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no facet is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// The `(page, per_page)` pair identifying a slice of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-indexed page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PageCursor {
    /// Build a cursor, replacing zero values with the defaults.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 {
                DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Number of pages needed for `total` items at `per_page` items each.
///
/// Zero items yield zero pages.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Price facet selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFilter {
    /// Items whose price type is the free marker.
    Free,
    /// Items whose price type is anything but the free marker.
    Paid,
}

impl PriceFilter {
    /// Parse the wire value. Anything other than `free`/`paid` is no filter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

/// Display projection of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub permalink: String,
    #[serde(default)]
    pub excerpt: String,
    /// Medium-size thumbnail URL, absent when the course has no image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response body of `GET /courses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    /// Matches ignoring pagination.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub page: u32,
    /// `ceil(total / per_page)`; zero when nothing matched.
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Resolved query criteria, only present for privileged callers outside
    /// production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

impl ListingResponse {
    /// Assemble a response, computing the page count from `total`.
    pub fn new(items: Vec<Item>, total: u64, cursor: PageCursor) -> Self {
        Self {
            total,
            per_page: cursor.per_page,
            page: cursor.page,
            pages: total_pages(total, cursor.per_page),
            items,
            debug: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn filter_params_drop_empty_values() {
        let mut params = FilterParams::new().with(facet::CATEGORY, "rust");
        params.insert(facet::TAG, "");
        assert_eq!(params.len(), 1);

        params.insert(facet::CATEGORY, "");
        assert!(params.is_empty());
    }

    #[test]
    fn filter_params_serialize_flat() {
        let params = FilterParams::new()
            .with(facet::CATEGORY, "a,b")
            .with(facet::PRICE, "free");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"category": "a,b", "price": "free"}));
    }

    #[test]
    fn cursor_defaults_replace_zero() {
        assert_eq!(PageCursor::new(0, 0), PageCursor::default());
        assert_eq!(PageCursor::new(3, 5).offset(), 10);
        assert_eq!(PageCursor::default().offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 12), 3);
        assert_eq!(total_pages(24, 12), 2);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(0, 12), 0);
    }

    #[test]
    fn price_filter_parses_only_known_values() {
        assert_eq!(PriceFilter::parse("free"), Some(PriceFilter::Free));
        assert_eq!(PriceFilter::parse("paid"), Some(PriceFilter::Paid));
        assert_eq!(PriceFilter::parse("Free"), None);
        assert_eq!(PriceFilter::parse(""), None);
    }

    #[test]
    fn item_omits_missing_thumbnail() {
        let item = Item {
            id: 7,
            title: "Intro".to_string(),
            permalink: "https://example.test/courses/intro/".to_string(),
            excerpt: String::new(),
            thumbnail: None,
            categories: vec![],
            tags: vec![],
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("thumbnail").is_none());
    }

    #[test]
    fn response_tolerates_missing_counters() {
        let parsed: ListingResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(parsed.total, 0);
        assert_eq!(parsed.pages, 0);
        assert!(parsed.debug.is_none());
    }

    #[test]
    fn response_pages_follow_total() {
        let response = ListingResponse::new(Vec::new(), 25, PageCursor::new(2, 12));
        assert_eq!(response.pages, 3);
        assert_eq!(response.page, 2);
        assert_eq!(
            ListingResponse::new(Vec::new(), 0, PageCursor::default()).pages,
            0
        );
    }
}
