//! Content storage backends.
//!
//! The listing service treats storage as a black box: hand it criteria, get
//! back one page of records and the unpaginated match count.

mod memory;
mod postgres;

pub use memory::MemoryContentStore;
pub use postgres::PgContentStore;

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::listing::ListingCriteria;
use crate::models::{CourseRecord, Taxonomy, Term};

/// One page of matching records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorePage {
    /// Records on the requested page, in criteria order.
    pub records: Vec<CourseRecord>,
    /// Matches ignoring pagination.
    pub total: u64,
}

/// Read access to course content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Execute criteria, returning the requested page and the total count.
    async fn query(&self, criteria: &ListingCriteria) -> Result<StorePage>;

    /// Terms of a taxonomy used by at least one published course, by name.
    async fn terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>>;

    /// Whether the backend is reachable.
    async fn healthy(&self) -> bool;
}

/// Read a JSON array of course records from a seed file.
pub fn read_seed_file(path: &Path) -> Result<Vec<CourseRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let records: Vec<CourseRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded seed courses");
    Ok(records)
}
