//! Coursegrid widget.
//!
//! Client side of the course grid: reads facet selections, queries the
//! listing endpoint, and renders cards, the count line and pagination into a
//! [`GridSurface`]. Nothing here depends on a particular UI toolkit.
//!
//! ```ignore
//! let config = WidgetConfig::from_page(&html)?;
//! let client = Arc::new(QueryClient::new(&config)?);
//! let controller = Controller::new(client, Box::new(HtmlGridRenderer), FilterState::standard(), &config);
//! let surface = controller.run(events, BufferSurface::default()).await;
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter_state;
pub mod render;
pub mod sequence;

pub use client::{ListingSource, QueryClient};
pub use config::WidgetConfig;
pub use controller::{Controller, UiEvent};
pub use error::{ClientError, ConfigError};
pub use filter_state::{ControlChange, ControlKind, FilterState};
pub use render::{BufferSurface, Frame, GridRenderer, GridSurface, HtmlGridRenderer, ViewState};
pub use sequence::SequenceGuard;
