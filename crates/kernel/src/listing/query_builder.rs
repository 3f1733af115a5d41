//! Course listing query builder using SeaQuery.
//!
//! Generates the page and count statements for a [`ListingCriteria`]:
//! - content type and status restriction
//! - taxonomy facets as `EXISTS` sub-selects on `course_term`
//! - the price facet (a missing price type counts as paid)
//! - ordering with an id tie-break, then LIMIT/OFFSET

use coursegrid_sdk::types::PriceFilter;
use sea_query::{
    Asterisk, Cond, Expr, Iden, Order, PostgresQueryBuilder, Query, SelectStatement,
};

use super::criteria::{ListingCriteria, SortOrder};
use crate::models::Taxonomy;
use crate::models::course::PRICE_TYPE_FREE;

#[derive(Iden)]
pub(crate) enum Course {
    Table,
    Id,
    ContentType,
    Status,
    Title,
    Slug,
    Body,
    Excerpt,
    FeaturedImage,
    PriceType,
    Created,
}

#[derive(Iden)]
pub(crate) enum CourseTerm {
    Table,
    CourseId,
    Taxonomy,
    Slug,
}

/// Query builder for course listings.
pub struct CourseQueryBuilder<'a> {
    criteria: &'a ListingCriteria,
}

impl<'a> CourseQueryBuilder<'a> {
    pub fn new(criteria: &'a ListingCriteria) -> Self {
        Self { criteria }
    }

    /// Build the SELECT for the criteria's page.
    pub fn build(&self) -> String {
        let mut query = Query::select();

        query.columns([
            (Course::Table, Course::Id),
            (Course::Table, Course::ContentType),
            (Course::Table, Course::Status),
            (Course::Table, Course::Title),
            (Course::Table, Course::Slug),
            (Course::Table, Course::Body),
            (Course::Table, Course::Excerpt),
            (Course::Table, Course::FeaturedImage),
            (Course::Table, Course::PriceType),
            (Course::Table, Course::Created),
        ]);
        query.from(Course::Table);

        self.add_filters(&mut query);
        self.add_sorts(&mut query);

        let cursor = self.criteria.cursor;
        query.limit(u64::from(cursor.per_page));
        query.offset(cursor.offset());

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT query over the same filters, ignoring pagination.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();
        query.expr(Expr::col(Asterisk).count());
        query.from(Course::Table);
        self.add_filters(&mut query);
        query.to_string(PostgresQueryBuilder)
    }

    fn add_filters(&self, query: &mut SelectStatement) {
        let criteria = self.criteria;

        query.and_where(Expr::col((Course::Table, Course::ContentType)).eq(&criteria.content_type));
        query.and_where(Expr::col((Course::Table, Course::Status)).eq(&criteria.status));

        if !criteria.categories.is_empty() {
            query.and_where(term_exists(Taxonomy::Category, &criteria.categories));
        }
        if !criteria.tags.is_empty() {
            query.and_where(term_exists(Taxonomy::Tag, &criteria.tags));
        }

        match criteria.price {
            Some(PriceFilter::Free) => {
                query.and_where(Expr::col((Course::Table, Course::PriceType)).eq(PRICE_TYPE_FREE));
            }
            Some(PriceFilter::Paid) => {
                query.cond_where(
                    Cond::any()
                        .add(Expr::col((Course::Table, Course::PriceType)).ne(PRICE_TYPE_FREE))
                        .add(Expr::col((Course::Table, Course::PriceType)).is_null()),
                );
            }
            None => {}
        }
    }

    fn add_sorts(&self, query: &mut SelectStatement) {
        let (column, direction, tie_break) = match self.criteria.order {
            SortOrder::NewestFirst => (Course::Created, Order::Desc, Order::Desc),
            SortOrder::OldestFirst => (Course::Created, Order::Asc, Order::Asc),
            SortOrder::Title => (Course::Title, Order::Asc, Order::Asc),
        };
        query.order_by((Course::Table, column), direction);
        query.order_by((Course::Table, Course::Id), tie_break);
    }
}

/// `EXISTS (SELECT 1 FROM course_term WHERE course_id = course.id AND taxonomy = ? AND slug IN (...))`
fn term_exists(taxonomy: Taxonomy, slugs: &[String]) -> sea_query::SimpleExpr {
    let mut sub = Query::select();
    sub.expr(Expr::val(1))
        .from(CourseTerm::Table)
        .and_where(
            Expr::col((CourseTerm::Table, CourseTerm::CourseId))
                .equals((Course::Table, Course::Id)),
        )
        .and_where(Expr::col((CourseTerm::Table, CourseTerm::Taxonomy)).eq(taxonomy.as_str()))
        .and_where(
            Expr::col((CourseTerm::Table, CourseTerm::Slug)).is_in(slugs.iter().map(String::as_str)),
        );
    Expr::exists(sub)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use coursegrid_sdk::types::PageCursor;

    fn criteria() -> ListingCriteria {
        ListingCriteria::new(PageCursor::new(2, 12))
    }

    #[test]
    fn default_listing_query() {
        let criteria = criteria();
        let sql = CourseQueryBuilder::new(&criteria).build();

        assert!(sql.contains("FROM \"course\""));
        assert!(sql.contains("\"course\".\"content_type\" = 'course'"));
        assert!(sql.contains("\"course\".\"status\" = 'publish'"));
        assert!(sql.contains(
            "ORDER BY \"course\".\"created\" DESC, \"course\".\"id\" DESC"
        ));
        assert!(sql.contains("LIMIT 12"));
        assert!(sql.contains("OFFSET 12"));
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn count_query_has_no_pagination() {
        let criteria = criteria();
        let sql = CourseQueryBuilder::new(&criteria).build_count();

        assert!(sql.contains("COUNT(*)"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn taxonomy_facets_use_exists() {
        let criteria = ListingCriteria {
            categories: vec!["design".into(), "art".into()],
            tags: vec!["online".into()],
            ..criteria()
        };
        let sql = CourseQueryBuilder::new(&criteria).build();

        assert_eq!(sql.matches("EXISTS").count(), 2);
        assert!(sql.contains("\"course_term\".\"taxonomy\" = 'category'"));
        assert!(sql.contains("\"course_term\".\"slug\" IN ('design', 'art')"));
        assert!(sql.contains("\"course_term\".\"taxonomy\" = 'tag'"));
        assert!(sql.contains("\"course_term\".\"course_id\" = \"course\".\"id\""));
    }

    #[test]
    fn paid_includes_missing_price_type() {
        let criteria = ListingCriteria {
            price: Some(PriceFilter::Paid),
            ..criteria()
        };
        let sql = CourseQueryBuilder::new(&criteria).build_count();

        assert!(sql.contains("\"course\".\"price_type\" <> 'free'"));
        assert!(sql.contains("\"course\".\"price_type\" IS NULL"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn free_is_exact_match() {
        let criteria = ListingCriteria {
            price: Some(PriceFilter::Free),
            ..criteria()
        };
        let sql = CourseQueryBuilder::new(&criteria).build();
        assert!(sql.contains("\"course\".\"price_type\" = 'free'"));
        assert!(!sql.contains("IS NULL"));
    }

    #[test]
    fn slugs_are_escaped() {
        let criteria = ListingCriteria {
            tags: vec!["o'brien".into()],
            ..criteria()
        };
        let sql = CourseQueryBuilder::new(&criteria).build();
        assert!(!sql.contains("'o'brien'"));
    }

    #[test]
    fn title_order_is_ascending() {
        let criteria = ListingCriteria {
            order: SortOrder::Title,
            ..criteria()
        };
        let sql = CourseQueryBuilder::new(&criteria).build();
        assert!(sql.contains("ORDER BY \"course\".\"title\" ASC, \"course\".\"id\" ASC"));
    }
}
