//! Request parameter normalization.
//!
//! Listing requests never fail on bad input: every parameter is coerced to
//! the nearest valid value or dropped.

use std::collections::HashMap;

use coursegrid_sdk::types::{DEFAULT_PER_PAGE, PageCursor, PriceFilter, facet};

/// Raw query parameters as received.
pub type RawParams = HashMap<String, String>;

/// Accepted names for the page number, in precedence order.
pub const PAGE_KEYS: [&str; 3] = ["page", "paged", "p"];

/// Accepted names for the page size, in precedence order.
pub const PER_PAGE_KEYS: [&str; 3] = ["per_page", "perpage", "pp"];

/// Page size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimits {
    /// Used when no valid page size was requested.
    pub default_per_page: u32,
    /// Requested sizes above this are clamped down to it.
    pub max_per_page: u32,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: 100,
        }
    }
}

impl ListingLimits {
    /// Bring a cursor back inside `page >= 1`, `1 <= per_page <= max`.
    pub fn clamp(&self, cursor: PageCursor) -> PageCursor {
        let page = cursor.page.max(1);
        let per_page = match cursor.per_page {
            0 => self.default_per_page,
            n if n > self.max_per_page => {
                tracing::warn!(
                    requested = n,
                    capped = self.max_per_page,
                    "per_page exceeds maximum, capping"
                );
                self.max_per_page
            }
            n => n,
        };
        PageCursor { page, per_page }
    }
}

/// Parameters after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    pub cursor: PageCursor,
    /// Acceptable category slugs (any of).
    pub categories: Vec<String>,
    /// Acceptable tag slugs (any of).
    pub tags: Vec<String>,
    pub price: Option<PriceFilter>,
}

/// Normalize raw request parameters.
pub fn normalize(raw: &RawParams, limits: &ListingLimits) -> NormalizedParams {
    let page = first_present(raw, &PAGE_KEYS)
        .and_then(parse_positive)
        .unwrap_or(1);
    let per_page = first_present(raw, &PER_PAGE_KEYS)
        .and_then(parse_positive)
        .unwrap_or(limits.default_per_page);

    NormalizedParams {
        cursor: limits.clamp(PageCursor { page, per_page }),
        categories: raw
            .get(facet::CATEGORY)
            .map(|v| split_slugs(v))
            .unwrap_or_default(),
        tags: raw
            .get(facet::TAG)
            .map(|v| split_slugs(v))
            .unwrap_or_default(),
        price: raw
            .get(facet::PRICE)
            .and_then(|v| PriceFilter::parse(v.trim())),
    }
}

/// First non-blank value among `keys`.
fn first_present<'a>(raw: &'a RawParams, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Parse a strictly positive integer.
///
/// Decimal input is truncated (`"2.9"` is page 2); zero, negatives and
/// garbage yield `None`.
pub fn parse_positive(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return (n > 0).then(|| u32::try_from(n).unwrap_or(u32::MAX));
    }
    let f = value.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if f < 1.0 {
        return None;
    }
    Some(if f >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        f.trunc() as u32
    })
}

/// Split a slug or comma-separated slug list into trimmed, lowercased,
/// distinct slugs. Stored slugs are lowercase.
pub fn split_slugs(value: &str) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let slug = slug.to_lowercase();
        if !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}
