//! HTTP middleware.

pub mod nonce;

pub use nonce::require_nonce;
