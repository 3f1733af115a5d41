//! Content models.

pub mod course;

pub use course::{CourseRecord, FeaturedImage, Taxonomy, Term};
