//! Course model.
//!
//! Courses are the content records the listing endpoint serves. The kernel
//! only reads them: records come from a [`ContentStore`](crate::store::ContentStore)
//! and are projected into the wire-level [`Item`](coursegrid_sdk::types::Item).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Content type served by the listing endpoint.
pub const COURSE_TYPE: &str = "course";

/// Publication status visible to listings.
pub const STATUS_PUBLISHED: &str = "publish";

/// Price type value marking a course as free.
pub const PRICE_TYPE_FREE: &str = "free";

/// Image size used for card thumbnails.
pub const THUMBNAIL_SIZE: &str = "medium";

/// Course record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Numeric identifier.
    pub id: u64,

    /// Content type machine name.
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Publication status.
    #[serde(default = "default_status")]
    pub status: String,

    /// Course title.
    pub title: String,

    /// URL slug, used to build the permalink.
    pub slug: String,

    /// Body content (may contain markup and shortcodes).
    #[serde(default)]
    pub body: String,

    /// Manually authored excerpt.
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Featured image with its size variants.
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,

    /// Category terms, in assignment order.
    #[serde(default)]
    pub categories: Vec<Term>,

    /// Tag terms, in assignment order.
    #[serde(default)]
    pub tags: Vec<Term>,

    /// Stored price type attribute (`"free"` marks a free course).
    #[serde(default)]
    pub price_type: Option<String>,

    /// Unix timestamp when created.
    #[serde(default)]
    pub created: i64,
}

fn default_content_type() -> String {
    COURSE_TYPE.to_string()
}

fn default_status() -> String {
    STATUS_PUBLISHED.to_string()
}

impl CourseRecord {
    /// Whether the record is listable at all (course type, published).
    pub fn is_published_course(&self) -> bool {
        self.content_type == COURSE_TYPE && self.status == STATUS_PUBLISHED
    }

    /// Whether the price type attribute equals the free marker.
    pub fn is_free(&self) -> bool {
        self.price_type.as_deref() == Some(PRICE_TYPE_FREE)
    }

    /// Terms of one taxonomy.
    pub fn terms(&self, taxonomy: Taxonomy) -> &[Term] {
        match taxonomy {
            Taxonomy::Category => &self.categories,
            Taxonomy::Tag => &self.tags,
        }
    }

    /// Whether any term of the taxonomy has one of the given slugs.
    pub fn has_any_term(&self, taxonomy: Taxonomy, slugs: &[String]) -> bool {
        self.terms(taxonomy)
            .iter()
            .any(|term| slugs.iter().any(|slug| slug == &term.slug))
    }

    /// Thumbnail URL for card display.
    pub fn thumbnail(&self) -> Option<String> {
        self.featured_image
            .as_ref()
            .map(|image| image.sized(THUMBNAIL_SIZE).to_string())
    }
}

/// A taxonomy term attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    /// Normalized identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
}

impl Term {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// Taxonomies a course can be classified by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    Category,
    Tag,
}

impl Taxonomy {
    /// Stored taxonomy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }

    /// Parse a stored taxonomy name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "category" => Some(Self::Category),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }
}

/// Featured image and its generated size variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    /// Full-size URL.
    pub url: String,

    /// Size name → URL.
    #[serde(default)]
    pub sizes: BTreeMap<String, String>,
}

impl FeaturedImage {
    /// URL for a named size, falling back to the full-size image.
    pub fn sized(&self, size: &str) -> &str {
        self.sizes.get(size).map(String::as_str).unwrap_or(&self.url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record() -> CourseRecord {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Intro",
            "slug": "intro",
            "categories": [{"slug": "design", "name": "Design"}],
            "price_type": "free"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_make_a_published_course() {
        let course = record();
        assert!(course.is_published_course());
        assert!(course.is_free());
        assert!(course.tags.is_empty());
    }

    #[test]
    fn term_membership() {
        let course = record();
        assert!(course.has_any_term(Taxonomy::Category, &["x".into(), "design".into()]));
        assert!(!course.has_any_term(Taxonomy::Tag, &["design".into()]));
    }

    #[test]
    fn thumbnail_prefers_medium_size() {
        let mut course = record();
        assert_eq!(course.thumbnail(), None);

        course.featured_image = Some(FeaturedImage {
            url: "/full.jpg".to_string(),
            sizes: BTreeMap::new(),
        });
        assert_eq!(course.thumbnail().as_deref(), Some("/full.jpg"));

        if let Some(image) = course.featured_image.as_mut() {
            image
                .sizes
                .insert("medium".to_string(), "/medium.jpg".to_string());
        }
        assert_eq!(course.thumbnail().as_deref(), Some("/medium.jpg"));
    }

    #[test]
    fn taxonomy_round_trip() {
        assert_eq!(Taxonomy::parse("tag"), Some(Taxonomy::Tag));
        assert_eq!(Taxonomy::Category.as_str(), "category");
        assert_eq!(Taxonomy::parse("genre"), None);
    }
}
