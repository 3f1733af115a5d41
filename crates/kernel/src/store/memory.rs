//! In-memory content store.
//!
//! Used when no database is configured and throughout the test suites.
//! Records are evaluated with [`ListingCriteria::matches`], the same facet
//! semantics the SQL builder encodes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ContentStore, StorePage, read_seed_file};
use crate::listing::{ListingCriteria, SortOrder};
use crate::models::{CourseRecord, Taxonomy, Term};

/// Content store holding records in process memory.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    records: RwLock<Vec<CourseRecord>>,
}

impl MemoryContentStore {
    /// Create a store with the given records.
    pub fn new(records: Vec<CourseRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Create a store from a JSON array of course records.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let records: Vec<CourseRecord> =
            serde_json::from_value(value).context("failed to parse course records")?;
        Ok(Self::new(records))
    }

    /// Load a JSON seed file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Ok(Self::new(read_seed_file(path)?))
    }

    /// Number of stored records, listable or not.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

fn compare(order: SortOrder, a: &CourseRecord, b: &CourseRecord) -> Ordering {
    match order {
        SortOrder::NewestFirst => b.created.cmp(&a.created).then(b.id.cmp(&a.id)),
        SortOrder::OldestFirst => a.created.cmp(&b.created).then(a.id.cmp(&b.id)),
        SortOrder::Title => a.title.cmp(&b.title).then(a.id.cmp(&b.id)),
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn query(&self, criteria: &ListingCriteria) -> Result<StorePage> {
        let mut matched: Vec<CourseRecord> = self
            .records
            .read()
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare(criteria.order, a, b));

        let total = matched.len() as u64;
        let offset = usize::try_from(criteria.cursor.offset()).unwrap_or(usize::MAX);
        let per_page = criteria.cursor.per_page as usize;
        let records = matched.into_iter().skip(offset).take(per_page).collect();

        Ok(StorePage { records, total })
    }

    async fn terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>> {
        // Slug -> smallest name seen for it.
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for record in self.records.read().iter() {
            if !record.is_published_course() {
                continue;
            }
            for term in record.terms(taxonomy) {
                names
                    .entry(term.slug.clone())
                    .and_modify(|name| {
                        if term.name < *name {
                            name.clone_from(&term.name);
                        }
                    })
                    .or_insert_with(|| term.name.clone());
            }
        }
        let mut terms: Vec<Term> = names
            .into_iter()
            .map(|(slug, name)| Term::new(slug, name))
            .collect();
        terms.sort_by(|a, b| a.name.cmp(&b.name).then(a.slug.cmp(&b.slug)));
        Ok(terms)
    }

    async fn healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use coursegrid_sdk::types::{PageCursor, PriceFilter};
    use coursegrid_test_utils::{catalogue, seed, test_course};

    fn store(courses: &[coursegrid_test_utils::TestCourse]) -> MemoryContentStore {
        MemoryContentStore::from_value(seed(courses)).unwrap()
    }

    #[tokio::test]
    async fn pages_are_sliced_after_counting() {
        let store = store(&catalogue(25));
        let criteria = ListingCriteria::new(PageCursor::new(3, 12));
        let page = store.query(&criteria).await.unwrap();

        assert_eq!(page.total, 25);
        assert_eq!(page.records.len(), 1);
        // Newest first: the oldest course lands on the last page.
        assert_eq!(page.records[0].id, 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let store = store(&catalogue(5));
        let page = store
            .query(&ListingCriteria::new(PageCursor::new(9, 12)))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert!(page.records.is_empty());
    }

    #[tokio::test]
    async fn price_filter_applies() {
        let store = store(&catalogue(10));
        let criteria = ListingCriteria {
            price: Some(PriceFilter::Free),
            ..ListingCriteria::new(PageCursor::default())
        };
        let page = store.query(&criteria).await.unwrap();
        assert_eq!(page.total, 5);
        assert!(page.records.iter().all(CourseRecord::is_free));
    }

    #[tokio::test]
    async fn ordering_options() {
        let store = store(&[
            test_course(1, "Beta"),
            test_course(2, "Alpha"),
            test_course(3, "Gamma"),
        ]);
        let mut criteria = ListingCriteria::new(PageCursor::default());

        let ids = |page: StorePage| page.records.iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(store.query(&criteria).await.unwrap()), vec![3, 2, 1]);
        criteria.order = SortOrder::OldestFirst;
        assert_eq!(ids(store.query(&criteria).await.unwrap()), vec![1, 2, 3]);
        criteria.order = SortOrder::Title;
        assert_eq!(ids(store.query(&criteria).await.unwrap()), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn terms_skip_unpublished_and_sort_by_name() {
        let store = store(&[
            test_course(1, "One").in_category("web", "Web"),
            test_course(2, "Two").in_category("art", "Art"),
            test_course(3, "Three").in_category("web", "Web"),
            test_course(4, "Four")
                .in_category("secret", "Secret")
                .unpublished(),
        ]);

        let terms = store.terms(Taxonomy::Category).await.unwrap();
        assert_eq!(terms, vec![Term::new("art", "Art"), Term::new("web", "Web")]);
        assert!(store.terms(Taxonomy::Tag).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn terms_are_unique_per_slug() {
        let store = store(&[
            test_course(1, "One").with_tag("ux", "UX"),
            test_course(2, "Two").with_tag("ux", "User Experience"),
            test_course(3, "Three").with_tag("a11y", "Accessibility"),
        ]);

        let terms = store.terms(Taxonomy::Tag).await.unwrap();
        assert_eq!(
            terms,
            vec![Term::new("a11y", "Accessibility"), Term::new("ux", "UX")]
        );
    }
}
