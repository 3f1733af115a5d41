//! Coursegrid SDK
//!
//! Wire types for the course listing endpoint. The kernel produces these,
//! the grid widget consumes them; both sides agree on the shapes, defaults
//! and header names defined here.

pub mod types;

pub mod prelude {
    pub use crate::types::*;
}

/// Element id of the JSON widget configuration embedded in the grid page.
pub const CONFIG_ELEMENT_ID: &str = "coursegrid-config";

/// Header carrying the capability nonce issued by the host page.
pub const NONCE_HEADER: &str = "x-grid-nonce";

/// Response header echoing the total number of matching items.
pub const TOTAL_HEADER: &str = "x-total-count";

/// Response header echoing the total number of pages.
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";
