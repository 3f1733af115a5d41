//! Resolved listing criteria.
//!
//! The criteria are what a content store executes: content type and status
//! restrictions, facet filters, ordering and the page window. Facets combine
//! with AND; values inside one facet combine with OR.

use coursegrid_sdk::types::{PageCursor, PriceFilter};
use serde::{Deserialize, Serialize};

use super::params::NormalizedParams;
use crate::models::course::{COURSE_TYPE, STATUS_PUBLISHED};
use crate::models::{CourseRecord, Taxonomy};

/// Query criteria handed to the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCriteria {
    /// Content type to list.
    pub content_type: String,

    /// Publication status to list.
    pub status: String,

    /// Category slugs; a record matches if it has any of them.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tag slugs; a record matches if it has any of them.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Price facet.
    #[serde(default)]
    pub price: Option<PriceFilter>,

    /// Result ordering.
    #[serde(default)]
    pub order: SortOrder,

    /// Page window.
    pub cursor: PageCursor,
}

impl ListingCriteria {
    /// Criteria for published courses with no facet filters.
    pub fn new(cursor: PageCursor) -> Self {
        Self {
            content_type: COURSE_TYPE.to_string(),
            status: STATUS_PUBLISHED.to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
            price: None,
            order: SortOrder::default(),
            cursor,
        }
    }

    /// Criteria from normalized request parameters.
    pub fn from_params(params: NormalizedParams) -> Self {
        Self {
            categories: params.categories,
            tags: params.tags,
            price: params.price,
            ..Self::new(params.cursor)
        }
    }

    /// Whether a record satisfies every restriction and facet.
    ///
    /// Pagination is not considered.
    pub fn matches(&self, record: &CourseRecord) -> bool {
        if record.content_type != self.content_type || record.status != self.status {
            return false;
        }
        if !self.categories.is_empty() && !record.has_any_term(Taxonomy::Category, &self.categories)
        {
            return false;
        }
        if !self.tags.is_empty() && !record.has_any_term(Taxonomy::Tag, &self.tags) {
            return false;
        }
        match self.price {
            Some(PriceFilter::Free) => record.is_free(),
            Some(PriceFilter::Paid) => !record.is_free(),
            None => true,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first, ties broken by descending id.
    #[default]
    NewestFirst,
    /// Oldest first, ties broken by ascending id.
    OldestFirst,
    /// Title ascending, ties broken by ascending id.
    Title,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::Term;

    fn course(id: u64, categories: &[&str], tags: &[&str], price: Option<&str>) -> CourseRecord {
        CourseRecord {
            id,
            content_type: COURSE_TYPE.to_string(),
            status: STATUS_PUBLISHED.to_string(),
            title: format!("Course {id}"),
            slug: format!("course-{id}"),
            body: String::new(),
            excerpt: None,
            featured_image: None,
            categories: categories.iter().map(|s| Term::new(*s, *s)).collect(),
            tags: tags.iter().map(|s| Term::new(*s, *s)).collect(),
            price_type: price.map(str::to_string),
            created: id as i64,
        }
    }

    fn criteria() -> ListingCriteria {
        ListingCriteria::new(PageCursor::default())
    }

    #[test]
    fn or_within_facet_and_across_facets() {
        let c = ListingCriteria {
            categories: vec!["a".into(), "b".into()],
            tags: vec!["x".into()],
            ..criteria()
        };

        assert!(c.matches(&course(1, &["a"], &["x"], None)));
        assert!(c.matches(&course(2, &["b"], &["x", "y"], None)));
        assert!(!c.matches(&course(3, &["a"], &["y"], None)));
        assert!(!c.matches(&course(4, &["c"], &["x"], None)));
        assert!(!c.matches(&course(5, &[], &["x"], None)));
    }

    #[test]
    fn free_requires_the_free_marker() {
        let c = ListingCriteria {
            price: Some(PriceFilter::Free),
            ..criteria()
        };
        assert!(c.matches(&course(1, &[], &[], Some("free"))));
        assert!(!c.matches(&course(2, &[], &[], Some("paid"))));
        assert!(!c.matches(&course(3, &[], &[], Some("Free"))));
        assert!(!c.matches(&course(4, &[], &[], None)));
    }

    #[test]
    fn paid_excludes_only_the_free_marker() {
        let c = ListingCriteria {
            price: Some(PriceFilter::Paid),
            ..criteria()
        };
        assert!(!c.matches(&course(1, &[], &[], Some("free"))));
        assert!(c.matches(&course(2, &[], &[], Some("paid"))));
        assert!(c.matches(&course(3, &[], &[], Some("subscribe"))));
        assert!(c.matches(&course(4, &[], &[], None)));
    }

    #[test]
    fn drafts_and_other_types_never_match() {
        let c = criteria();
        let mut draft = course(1, &[], &[], None);
        draft.status = "draft".to_string();
        assert!(!c.matches(&draft));

        let mut lesson = course(2, &[], &[], None);
        lesson.content_type = "lesson".to_string();
        assert!(!c.matches(&lesson));

        assert!(c.matches(&course(3, &[], &[], None)));
    }

    #[test]
    fn criteria_serialize_for_diagnostics() {
        let json = serde_json::to_value(ListingCriteria {
            price: Some(PriceFilter::Free),
            ..criteria()
        })
        .unwrap();
        assert_eq!(json["content_type"], "course");
        assert_eq!(json["price"], "free");
        assert_eq!(json["order"], "newest_first");
        assert_eq!(json["cursor"]["per_page"], 12);
    }
}
