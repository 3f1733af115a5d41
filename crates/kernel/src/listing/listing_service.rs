//! Listing service: resolves a request into one page of course cards.

use std::sync::Arc;

use anyhow::Result;
use coursegrid_sdk::types::{Item, ListingResponse};

use super::criteria::ListingCriteria;
use super::excerpt::excerpt_for;
use super::extension::CriteriaHookRegistry;
use super::params::{ListingLimits, RawParams, normalize};
use crate::models::CourseRecord;
use crate::store::ContentStore;

/// Outcome of a listing request.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Response body for the client.
    pub response: ListingResponse,
    /// Criteria that were executed, after hooks.
    pub criteria: ListingCriteria,
}

/// Service answering listing requests.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn ContentStore>,
    hooks: Arc<CriteriaHookRegistry>,
    limits: ListingLimits,
    site_url: String,
}

impl ListingService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        hooks: Arc<CriteriaHookRegistry>,
        limits: ListingLimits,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            hooks,
            limits,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve raw request parameters into a listing response.
    ///
    /// Parameter problems never fail the request; only store errors do.
    pub async fn resolve(&self, raw: &RawParams) -> Result<Resolved> {
        let params = normalize(raw, &self.limits);
        let mut criteria = ListingCriteria::from_params(params);

        self.hooks.apply(&mut criteria, raw);
        criteria.cursor = self.limits.clamp(criteria.cursor);

        let page = self.store.query(&criteria).await?;
        tracing::debug!(
            total = page.total,
            returned = page.records.len(),
            page = criteria.cursor.page,
            per_page = criteria.cursor.per_page,
            "listing resolved"
        );

        let items = page.records.iter().map(|r| self.project(r)).collect();
        let response = ListingResponse::new(items, page.total, criteria.cursor);

        Ok(Resolved { response, criteria })
    }

    /// Canonical URL of a course.
    pub fn permalink(&self, slug: &str) -> String {
        format!("{}/courses/{slug}/", self.site_url)
    }

    /// Project a stored record into its card representation.
    pub fn project(&self, record: &CourseRecord) -> Item {
        Item {
            id: record.id,
            title: record.title.clone(),
            permalink: self.permalink(&record.slug),
            excerpt: excerpt_for(record.excerpt.as_deref(), &record.body),
            thumbnail: record.thumbnail(),
            categories: record.categories.iter().map(|t| t.name.clone()).collect(),
            tags: record.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::listing::CriteriaHook;
    use crate::store::MemoryContentStore;
    use coursegrid_sdk::types::PageCursor;
    use coursegrid_test_utils::{TestCourse, catalogue, seed, test_course};

    fn service(courses: &[TestCourse], hooks: CriteriaHookRegistry) -> ListingService {
        let store = MemoryContentStore::from_value(seed(courses)).unwrap();
        ListingService::new(
            Arc::new(store),
            Arc::new(hooks),
            ListingLimits::default(),
            "https://learn.example/",
        )
    }

    fn raw(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn default_request_returns_first_page() {
        let svc = service(&catalogue(25), CriteriaHookRegistry::new());
        let resolved = svc.resolve(&RawParams::new()).await.unwrap();
        let response = resolved.response;

        assert_eq!(response.total, 25);
        assert_eq!(response.pages, 3);
        assert_eq!(response.page, 1);
        assert_eq!(response.per_page, 12);
        assert_eq!(response.items.len(), 12);
        assert_eq!(response.items[0].id, 25);
    }

    #[tokio::test]
    async fn projection_builds_card_fields() {
        let course = test_course(7, "Intro to Rust")
            .in_category("development", "Development")
            .with_tag("online", "Online")
            .with_body("<p>Learn &amp; build.</p>")
            .with_image("https://cdn.example/full.jpg", "https://cdn.example/medium.jpg");
        let svc = service(&[course], CriteriaHookRegistry::new());
        let item = svc.resolve(&RawParams::new()).await.unwrap().response.items.remove(0);

        assert_eq!(item.permalink, "https://learn.example/courses/intro-to-rust/");
        assert_eq!(item.excerpt, "Learn & build.");
        assert_eq!(item.thumbnail.as_deref(), Some("https://cdn.example/medium.jpg"));
        assert_eq!(item.categories, vec!["Development"]);
        assert_eq!(item.tags, vec!["Online"]);
    }

    #[tokio::test]
    async fn page_beyond_end_keeps_counts() {
        let svc = service(&catalogue(5), CriteriaHookRegistry::new());
        let response = svc.resolve(&raw(&[("page", "4")])).await.unwrap().response;
        assert_eq!(response.total, 5);
        assert_eq!(response.pages, 1);
        assert_eq!(response.page, 4);
        assert!(response.items.is_empty());
    }

    struct Oversize;

    impl CriteriaHook for Oversize {
        fn name(&self) -> &str {
            "oversize"
        }

        fn alter(&self, criteria: &mut ListingCriteria, _raw: &RawParams) {
            criteria.cursor = PageCursor {
                page: 0,
                per_page: 10_000,
            };
        }
    }

    #[tokio::test]
    async fn hooks_cannot_escape_page_bounds() {
        let hooks = CriteriaHookRegistry::new().with(0, Arc::new(Oversize));
        let svc = service(&catalogue(3), hooks);
        let resolved = svc.resolve(&RawParams::new()).await.unwrap();
        assert_eq!(resolved.criteria.cursor, PageCursor::new(1, 100));
        assert_eq!(resolved.response.per_page, 100);
    }

    struct OnlyTag(&'static str);

    impl CriteriaHook for OnlyTag {
        fn name(&self) -> &str {
            "only-tag"
        }

        fn alter(&self, criteria: &mut ListingCriteria, raw: &RawParams) {
            if raw.contains_key("featured") {
                criteria.tags = vec![self.0.to_string()];
            }
        }
    }

    #[tokio::test]
    async fn hooks_can_narrow_results() {
        let courses = vec![
            test_course(1, "One").with_tag("featured", "Featured"),
            test_course(2, "Two"),
        ];
        let hooks = CriteriaHookRegistry::new().with(0, Arc::new(OnlyTag("featured")));
        let svc = service(&courses, hooks);

        let all = svc.resolve(&RawParams::new()).await.unwrap();
        assert_eq!(all.response.total, 2);

        let narrowed = svc.resolve(&raw(&[("featured", "1")])).await.unwrap();
        assert_eq!(narrowed.response.total, 1);
        assert_eq!(narrowed.criteria.tags, vec!["featured"]);
    }
}
