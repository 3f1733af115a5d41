//! Coursegrid test utilities.
//!
//! Helpers for integration testing: course fixtures in the JSON seed shape
//! the in-memory content store loads, and assertion utilities for markup and
//! JSON payloads.

use serde_json::{Value as JsonValue, json};

/// Create a published course with default values.
///
/// `created` follows `id`, so higher ids sort as newer.
pub fn test_course(id: u64, title: &str) -> TestCourse {
    TestCourse {
        id,
        content_type: "course".to_string(),
        status: "publish".to_string(),
        title: title.to_string(),
        slug: slugify(title),
        body: String::new(),
        excerpt: None,
        featured_image: None,
        categories: Vec::new(),
        tags: Vec::new(),
        price_type: None,
        created: 1_700_000_000 + id as i64 * 60,
    }
}

/// A course fixture builder.
#[derive(Debug, Clone)]
pub struct TestCourse {
    pub id: u64,
    pub content_type: String,
    pub status: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<JsonValue>,
    pub categories: Vec<(String, String)>,
    pub tags: Vec<(String, String)>,
    pub price_type: Option<String>,
    pub created: i64,
}

impl TestCourse {
    /// Attach a category term.
    pub fn in_category(mut self, slug: &str, name: &str) -> Self {
        self.categories.push((slug.to_string(), name.to_string()));
        self
    }

    /// Attach a tag term.
    pub fn with_tag(mut self, slug: &str, name: &str) -> Self {
        self.tags.push((slug.to_string(), name.to_string()));
        self
    }

    /// Mark as free.
    pub fn free(self) -> Self {
        self.with_price_type("free")
    }

    /// Mark as paid.
    pub fn paid(self) -> Self {
        self.with_price_type("paid")
    }

    /// Set an arbitrary price type attribute.
    pub fn with_price_type(mut self, price_type: &str) -> Self {
        self.price_type = Some(price_type.to_string());
        self
    }

    /// Set as draft.
    pub fn unpublished(mut self) -> Self {
        self.status = "draft".to_string();
        self
    }

    /// Change the content type.
    pub fn of_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Set the body content.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Set a manually authored excerpt.
    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_string());
        self
    }

    /// Attach a featured image with a medium-size variant.
    pub fn with_image(mut self, url: &str, medium: &str) -> Self {
        self.featured_image = Some(json!({
            "url": url,
            "sizes": { "medium": medium }
        }));
        self
    }

    /// Override the creation timestamp.
    pub fn created_at(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    /// Serialize into the seed record shape.
    pub fn to_json(&self) -> JsonValue {
        let terms = |list: &[(String, String)]| -> Vec<JsonValue> {
            list.iter()
                .map(|(slug, name)| json!({ "slug": slug, "name": name }))
                .collect()
        };

        json!({
            "id": self.id,
            "content_type": self.content_type,
            "status": self.status,
            "title": self.title,
            "slug": self.slug,
            "body": self.body,
            "excerpt": self.excerpt,
            "featured_image": self.featured_image,
            "categories": terms(&self.categories),
            "tags": terms(&self.tags),
            "price_type": self.price_type,
            "created": self.created,
        })
    }
}

/// Build a seed array from fixtures.
pub fn seed(courses: &[TestCourse]) -> JsonValue {
    JsonValue::Array(courses.iter().map(TestCourse::to_json).collect())
}

/// A catalogue of `count` courses alternating between two categories,
/// free/paid pricing, and carrying one shared tag.
pub fn catalogue(count: u64) -> Vec<TestCourse> {
    (1..=count)
        .map(|id| {
            let course = test_course(id, &format!("Course {id}")).with_tag("online", "Online");
            let course = if id % 2 == 0 {
                course.in_category("design", "Design").paid()
            } else {
                course.in_category("development", "Development").free()
            };
            course.with_body(&format!("Body of course number {id}."))
        })
        .collect()
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Assertion helpers for JSON and markup.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert how many times a substring occurs.
    pub fn occurrences(haystack: &str, needle: &str, expected: usize) {
        let actual = haystack.matches(needle).count();
        assert_eq!(
            actual, expected,
            "Expected '{needle}' {expected} times, found {actual}\nActual: {haystack}"
        );
    }
}
