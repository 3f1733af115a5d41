//! Course listing: parameter normalization, criteria, hooks and execution.
//!
//! A listing request flows through:
//! 1. [`normalize`] coerces raw query parameters
//! 2. [`ListingCriteria`] captures what to fetch
//! 3. [`CriteriaHookRegistry`] lets site code adjust the criteria
//! 4. a [`ContentStore`](crate::store::ContentStore) executes them
//! 5. [`ListingService`] projects the records into response items

pub mod criteria;
pub mod excerpt;
pub mod extension;
pub mod listing_service;
pub mod params;
pub mod query_builder;

pub use criteria::{ListingCriteria, SortOrder};
pub use excerpt::{EXCERPT_MORE, EXCERPT_WORDS, excerpt_for};
pub use extension::{CriteriaHook, CriteriaHookRegistry};
pub use listing_service::{ListingService, Resolved};
pub use params::{ListingLimits, NormalizedParams, RawParams, normalize};
pub use query_builder::CourseQueryBuilder;
