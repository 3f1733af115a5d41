//! PostgreSQL content store.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{ContentStore, StorePage};
use crate::listing::{CourseQueryBuilder, ListingCriteria};
use crate::models::course::{COURSE_TYPE, STATUS_PUBLISHED};
use crate::models::{CourseRecord, FeaturedImage, Taxonomy, Term};

/// Content store backed by the `course` and `course_term` tables.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: i64,
    content_type: String,
    status: String,
    title: String,
    slug: String,
    body: String,
    excerpt: Option<String>,
    featured_image: Option<Json<FeaturedImage>>,
    price_type: Option<String>,
    created: i64,
}

impl From<CourseRow> for CourseRecord {
    fn from(row: CourseRow) -> Self {
        Self {
            id: u64::try_from(row.id).unwrap_or_default(),
            content_type: row.content_type,
            status: row.status,
            title: row.title,
            slug: row.slug,
            body: row.body,
            excerpt: row.excerpt,
            featured_image: row.featured_image.map(|Json(image)| image),
            categories: Vec::new(),
            tags: Vec::new(),
            price_type: row.price_type,
            created: row.created,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TermRow {
    course_id: i64,
    taxonomy: String,
    slug: String,
    name: String,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a course together with its terms.
    ///
    /// Term weights follow assignment order, so terms read back in the order
    /// they were given.
    pub async fn upsert(&self, record: &CourseRecord) -> Result<()> {
        let id = i64::try_from(record.id).context("course id out of range")?;
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        sqlx::query(
            "INSERT INTO course \
             (id, content_type, status, title, slug, body, excerpt, featured_image, price_type, created) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET \
             content_type = EXCLUDED.content_type, status = EXCLUDED.status, \
             title = EXCLUDED.title, slug = EXCLUDED.slug, body = EXCLUDED.body, \
             excerpt = EXCLUDED.excerpt, featured_image = EXCLUDED.featured_image, \
             price_type = EXCLUDED.price_type, created = EXCLUDED.created",
        )
        .bind(id)
        .bind(&record.content_type)
        .bind(&record.status)
        .bind(&record.title)
        .bind(&record.slug)
        .bind(&record.body)
        .bind(&record.excerpt)
        .bind(record.featured_image.as_ref().map(Json))
        .bind(&record.price_type)
        .bind(record.created)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to save course {}", record.id))?;

        sqlx::query("DELETE FROM course_term WHERE course_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("failed to clear course terms")?;

        for taxonomy in [Taxonomy::Category, Taxonomy::Tag] {
            for (weight, term) in record.terms(taxonomy).iter().enumerate() {
                sqlx::query(
                    "INSERT INTO course_term (course_id, taxonomy, slug, name, weight) \
                     VALUES ($1, $2, $3, $4, $5) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(taxonomy.as_str())
                .bind(&term.slug)
                .bind(&term.name)
                .bind(i16::try_from(weight).unwrap_or(i16::MAX))
                .execute(&mut *tx)
                .await
                .context("failed to save course term")?;
            }
        }

        tx.commit()
            .await
            .context("failed to commit course")?;
        Ok(())
    }

    /// Attach taxonomy terms to a page of records with one batched query.
    async fn load_terms(&self, records: &mut [CourseRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let ids: Vec<i64> = records
            .iter()
            .filter_map(|r| i64::try_from(r.id).ok())
            .collect();

        let rows = sqlx::query_as::<_, TermRow>(
            "SELECT course_id, taxonomy, slug, name FROM course_term \
             WHERE course_id = ANY($1) ORDER BY course_id, weight, name",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .context("failed to load course terms")?;

        let mut by_course: HashMap<i64, Vec<TermRow>> = HashMap::new();
        for row in rows {
            by_course.entry(row.course_id).or_default().push(row);
        }

        for record in records.iter_mut() {
            let Some(rows) = i64::try_from(record.id)
                .ok()
                .and_then(|id| by_course.remove(&id))
            else {
                continue;
            };
            for row in rows {
                let term = Term::new(row.slug, row.name);
                match Taxonomy::parse(&row.taxonomy) {
                    Some(Taxonomy::Category) => record.categories.push(term),
                    Some(Taxonomy::Tag) => record.tags.push(term),
                    None => {
                        tracing::debug!(taxonomy = %row.taxonomy, "ignoring unknown taxonomy");
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn query(&self, criteria: &ListingCriteria) -> Result<StorePage> {
        let builder = CourseQueryBuilder::new(criteria);

        // Count and page share one transaction so the statement timeout
        // applies to both and resets on commit.
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        sqlx::query("SET LOCAL statement_timeout = '10s'")
            .execute(&mut *tx)
            .await
            .context("failed to set statement timeout")?;

        let count_sql = builder.build_count();
        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&mut *tx)
            .await
            .context("failed to execute count query")?;

        let main_sql = builder.build();
        let rows = sqlx::query_as::<_, CourseRow>(&main_sql)
            .fetch_all(&mut *tx)
            .await
            .context("failed to execute listing query")?;

        tx.commit()
            .await
            .context("failed to commit listing transaction")?;

        let mut records: Vec<CourseRecord> = rows.into_iter().map(CourseRecord::from).collect();
        self.load_terms(&mut records).await?;

        Ok(StorePage {
            records,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>> {
        // One row per slug; when courses disagree on a term's name the
        // smallest one wins. Byte-order collation keeps ordering stable
        // across database locales.
        let terms = sqlx::query_as::<_, (String, String)>(
            "SELECT t.slug, MIN(t.name COLLATE \"C\") AS name FROM course_term t \
             JOIN course c ON c.id = t.course_id \
             WHERE t.taxonomy = $1 AND c.content_type = $2 AND c.status = $3 \
             GROUP BY t.slug \
             ORDER BY MIN(t.name COLLATE \"C\"), t.slug COLLATE \"C\"",
        )
        .bind(taxonomy.as_str())
        .bind(COURSE_TYPE)
        .bind(STATUS_PUBLISHED)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to load {} terms", taxonomy.as_str()))?;

        Ok(terms
            .into_iter()
            .map(|(slug, name)| Term::new(slug, name))
            .collect())
    }

    async fn healthy(&self) -> bool {
        crate::db::check_health(&self.pool).await
    }
}
