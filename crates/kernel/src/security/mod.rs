//! Request authenticity checks.

pub mod nonce;

pub use nonce::{LISTING_ACTION, NonceService};
