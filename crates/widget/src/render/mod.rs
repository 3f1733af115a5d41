//! Grid rendering.
//!
//! A [`GridRenderer`] turns a [`ViewState`] into a [`Frame`]: full
//! replacement content for the grid, count and pagination regions. Regions
//! set to `None` are left untouched. A [`GridSurface`] is wherever the
//! content ends up.

mod html;
pub mod pager;

pub use html::{HtmlGridRenderer, escape_html};

use coursegrid_sdk::types::{ListingResponse, PageCursor};

/// What the grid should currently show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// A load is in flight; show `count` skeleton cards.
    Loading { count: u32 },
    /// A load finished. `requested` fills in counters the response omits.
    Loaded {
        response: ListingResponse,
        requested: PageCursor,
    },
    /// A load failed with the given detail.
    Failed { message: String },
}

/// Replacement content for each page region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub grid: Option<String>,
    pub count: Option<String>,
    pub pagination: Option<String>,
}

impl Frame {
    /// Write every present region to a surface.
    pub fn apply_to<S: GridSurface + ?Sized>(&self, surface: &mut S) {
        if let Some(grid) = &self.grid {
            surface.set_grid(grid);
        }
        if let Some(count) = &self.count {
            surface.set_count(count);
        }
        if let Some(pagination) = &self.pagination {
            surface.set_pagination(pagination);
        }
    }
}

/// Produces region content from view state.
pub trait GridRenderer: Send + Sync {
    fn render(&self, state: &ViewState) -> Frame;
}

/// Write target for rendered regions. Each call replaces the region.
pub trait GridSurface {
    fn set_grid(&mut self, html: &str);
    fn set_count(&mut self, text: &str);
    fn set_pagination(&mut self, html: &str);
}

/// A surface holding region content in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSurface {
    pub grid: String,
    pub count: String,
    pub pagination: String,
    /// Number of grid replacements so far.
    pub grid_writes: usize,
}

impl GridSurface for BufferSurface {
    fn set_grid(&mut self, html: &str) {
        self.grid = html.to_string();
        self.grid_writes += 1;
    }

    fn set_count(&mut self, text: &str) {
        self.count = text.to_string();
    }

    fn set_pagination(&mut self, html: &str) {
        self.pagination = html.to_string();
    }
}
