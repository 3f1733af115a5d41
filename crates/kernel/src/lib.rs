//! Coursegrid Kernel Library
//!
//! This library exposes kernel internals for integration testing.
//! The main entry point for running the server is the `coursegrid` binary.

pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod state;
pub mod store;
pub mod theme;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
