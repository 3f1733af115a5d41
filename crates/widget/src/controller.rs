//! Controller loop.
//!
//! Wires UI events to loads: facet changes reload page 1 after a quiet
//! period, page clicks reload immediately with the current filters, and reset
//! clears every control then reloads page 1. Each load shows skeletons and runs
//! on its own task in a [`JoinSet`]; the [`SequenceGuard`] decides whether its
//! result still gets rendered.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use coursegrid_sdk::types::{DEFAULT_PAGE, ListingResponse, PageCursor};
use tokio::sync::mpsc;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::client::ListingSource;
use crate::config::WidgetConfig;
use crate::error::ClientError;
use crate::filter_state::{ControlChange, FilterState};
use crate::render::{GridRenderer, GridSurface, ViewState};
use crate::sequence::SequenceGuard;

/// Input to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A facet control changed (debounced).
    Control(ControlChange),
    /// A pagination button was activated.
    PageClicked(u32),
    /// The reset button was activated.
    Reset,
}

/// Outcome of one load task.
type LoadResult = Result<ListingResponse, ClientError>;

/// What a running load was issued for.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    seq: u64,
    requested: PageCursor,
}

/// Load tasks in flight, keyed so a task that dies still maps to its ticket.
#[derive(Default)]
struct Loads {
    tasks: JoinSet<LoadResult>,
    tickets: HashMap<Id, Ticket>,
}

/// Drives loads and rendering for one grid.
pub struct Controller {
    source: Arc<dyn ListingSource>,
    renderer: Box<dyn GridRenderer>,
    filters: FilterState,
    per_page: u32,
    skeletons: u32,
    debounce: Duration,
    guard: SequenceGuard,
}

impl Controller {
    pub fn new(
        source: Arc<dyn ListingSource>,
        renderer: Box<dyn GridRenderer>,
        filters: FilterState,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            source,
            renderer,
            filters,
            per_page: config.per_page,
            skeletons: config.skeleton_count(),
            debounce: config.debounce(),
            guard: SequenceGuard::new(),
        }
    }

    /// Current facet state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Run until the event channel closes, then return the surface.
    ///
    /// Page 1 is loaded on start. After the channel closes, loads already in
    /// flight finish (and render if still current); a pending debounced
    /// reload is dropped. A load task that panics renders as a failed load.
    pub async fn run<S: GridSurface>(
        mut self,
        mut events: mpsc::Receiver<UiEvent>,
        mut surface: S,
    ) -> S {
        let mut loads = Loads::default();

        self.load(DEFAULT_PAGE, &mut surface, &mut loads);

        let mut deadline = Instant::now();
        let mut pending = false;
        let mut open = true;

        while open || !loads.tasks.is_empty() {
            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(UiEvent::Control(change)) => {
                        if !self.filters.apply(&change) {
                            debug!(?change, "change for unregistered control");
                        }
                        pending = true;
                        deadline = Instant::now() + self.debounce;
                    }
                    Some(UiEvent::PageClicked(page)) => {
                        self.load(page.max(1), &mut surface, &mut loads);
                    }
                    Some(UiEvent::Reset) => {
                        self.filters.reset();
                        pending = false;
                        self.load(DEFAULT_PAGE, &mut surface, &mut loads);
                    }
                    None => {
                        open = false;
                        pending = false;
                    }
                },
                () = sleep_until(deadline), if pending => {
                    pending = false;
                    self.load(DEFAULT_PAGE, &mut surface, &mut loads);
                }
                Some(joined) = loads.tasks.join_next_with_id(), if !loads.tasks.is_empty() => {
                    self.complete(joined, &mut loads, &mut surface);
                }
            }
        }

        surface
    }

    fn load<S: GridSurface>(&mut self, page: u32, surface: &mut S, loads: &mut Loads) {
        let params = self.filters.read();
        let requested = PageCursor::new(page, self.per_page);
        let seq = self.guard.issue();
        debug!(seq, page, ?params, "loading grid");

        self.renderer
            .render(&ViewState::Loading {
                count: self.skeletons,
            })
            .apply_to(surface);

        let source = Arc::clone(&self.source);
        let handle = loads
            .tasks
            .spawn(async move { source.fetch(&params, requested).await });
        loads.tickets.insert(handle.id(), Ticket { seq, requested });
    }

    fn complete<S: GridSurface>(
        &mut self,
        joined: Result<(Id, LoadResult), JoinError>,
        loads: &mut Loads,
        surface: &mut S,
    ) {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result.map_err(|err| err.to_string())),
            Err(err) => (err.id(), Err(format!("listing load stopped: {err}"))),
        };
        let Some(ticket) = loads.tickets.remove(&id) else {
            return;
        };

        if !self.guard.accept(ticket.seq) {
            debug!(
                seq = ticket.seq,
                latest = self.guard.latest(),
                "dropping stale listing response"
            );
            return;
        }

        let state = match result {
            Ok(response) => ViewState::Loaded {
                response,
                requested: ticket.requested,
            },
            Err(message) => {
                warn!(error = %message, "listing load failed");
                ViewState::Failed { message }
            }
        };
        self.renderer.render(&state).apply_to(surface);
    }
}
