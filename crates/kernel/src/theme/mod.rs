//! Theme engine and template rendering.
//!
//! Provides Tera-based rendering of the grid page scaffold the widget
//! attaches to.

mod engine;

pub use engine::{EmbeddedConfig, GRID_TEMPLATE, GridPage, ThemeEngine};
