//! Single-flight pagination state machine.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{ImagePage, PageError, PageSource};
use crate::catalog::CatalogIndex;
use crate::metadata::MetadataLookup;

/// Where a pagination sequence currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationPhase {
    /// More pages may be requested.
    Ready,
    /// A request is outstanding.
    Loading,
    /// The host reported no further pages.
    Exhausted,
    /// The very first page was empty and final: there is nothing to show.
    Empty,
    /// The last fetch failed; pagination is halted until [`PaginationDriver::retry`].
    Failed(String),
}

/// Result of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was merged; `added` counts identifiers not seen before.
    Appended { added: usize },
    Exhausted,
    Empty,
    Failed(String),
    /// Nothing was done: a request is already in flight or was cancelled.
    Skipped,
}

/// Ticket for one outstanding page request.
///
/// Obtained from [`PaginationDriver::begin`] and handed back to
/// [`PaginationDriver::complete`] with the fetch result.
#[derive(Debug)]
pub struct PageRequest {
    cursor: Option<String>,
    generation: u64,
}

impl PageRequest {
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// Clears the in-flight marker of an abandoned [`PaginationDriver::load_more`].
struct InFlightGuard<'a> {
    in_flight: &'a mut Option<u64>,
    generation: &'a mut u64,
    request: u64,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.in_flight == Some(self.request) {
            debug!(generation = self.request, "Page request dropped mid-fetch");
            *self.in_flight = None;
            *self.generation += 1;
        }
    }
}

/// Drives cursor pagination and owns the accumulated [`CatalogIndex`].
///
/// At most one request is outstanding at a time. A failed fetch leaves the
/// index untouched and halts pagination until the consumer retries. Results
/// of cancelled requests are discarded on arrival.
pub struct PaginationDriver<S> {
    source: S,
    lookup: Arc<dyn MetadataLookup>,
    index: CatalogIndex,
    cursor: Option<String>,
    has_more: bool,
    pages_loaded: usize,
    generation: u64,
    in_flight: Option<u64>,
    error: Option<String>,
}

impl<S: PageSource> PaginationDriver<S> {
    pub fn new(source: S, lookup: Arc<dyn MetadataLookup>) -> Self {
        Self {
            source,
            lookup,
            index: CatalogIndex::new(),
            cursor: None,
            has_more: true,
            pages_loaded: 0,
            generation: 0,
            in_flight: None,
            error: None,
        }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> PaginationPhase {
        if self.in_flight.is_some() {
            return PaginationPhase::Loading;
        }
        if let Some(error) = &self.error {
            return PaginationPhase::Failed(error.clone());
        }
        match (self.has_more, self.index.is_empty() && self.pages_loaded > 0) {
            (true, _) => PaginationPhase::Ready,
            (false, true) => PaginationPhase::Empty,
            (false, false) => PaginationPhase::Exhausted,
        }
    }

    /// Claim the next page request, if one may be issued now.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.phase() != PaginationPhase::Ready {
            return None;
        }

        self.in_flight = Some(self.generation);
        Some(PageRequest {
            cursor: self.cursor.clone(),
            generation: self.generation,
        })
    }

    /// Apply the result of a request obtained from [`begin`](Self::begin).
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<ImagePage, PageError>,
    ) -> LoadOutcome {
        if self.in_flight != Some(request.generation) {
            debug!(generation = request.generation, "Discarding result of cancelled request");
            return LoadOutcome::Skipped;
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Failed to load images");
                self.error = Some(message.clone());
                return LoadOutcome::Failed(message);
            }
        };

        let added = self.index.merge_page(&page.images, self.lookup.as_ref());
        self.pages_loaded += 1;
        self.cursor = page.next_cursor;
        self.has_more = self.cursor.is_some();

        debug!(
            page = self.pages_loaded,
            received = page.images.len(),
            added,
            total = self.index.len(),
            has_more = self.has_more,
            "Merged page"
        );

        if self.phase() == PaginationPhase::Empty {
            info!("Gallery has no images");
            LoadOutcome::Empty
        } else {
            LoadOutcome::Appended { added }
        }
    }

    /// Fetch and merge the next page.
    ///
    /// Dropping this future mid-fetch cancels the request, leaving the driver
    /// ready to load the same page again.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(request) = self.begin() else {
            return self.idle_outcome();
        };

        let guard = InFlightGuard {
            in_flight: &mut self.in_flight,
            generation: &mut self.generation,
            request: request.generation,
            armed: true,
        };
        let result = self.source.fetch_page(request.cursor()).await;
        guard.disarm();

        self.complete(request, result)
    }

    /// Clear a halted error and load again.
    pub async fn retry(&mut self) -> LoadOutcome {
        self.error = None;
        self.load_more().await
    }

    /// Forget any outstanding request; its result will be ignored.
    pub fn cancel(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("Cancelled in-flight page request");
        }
        self.generation += 1;
    }

    /// Start over from the first page with an empty index.
    pub fn reset(&mut self) {
        self.cancel();
        self.index.clear();
        self.cursor = None;
        self.has_more = true;
        self.pages_loaded = 0;
        self.error = None;
    }

    fn idle_outcome(&self) -> LoadOutcome {
        match self.phase() {
            PaginationPhase::Exhausted => LoadOutcome::Exhausted,
            PaginationPhase::Empty => LoadOutcome::Empty,
            PaginationPhase::Failed(e) => LoadOutcome::Failed(e),
            PaginationPhase::Ready | PaginationPhase::Loading => LoadOutcome::Skipped,
        }
    }
}
