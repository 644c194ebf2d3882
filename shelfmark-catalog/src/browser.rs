use shelfmark_core::{FilterState, MediaRecord};

use crate::cache::PageCache;
use crate::error::CatalogError;
use crate::service::PAGE_SIZE;

/// Where a browse session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    /// No search has been issued yet.
    Idle,
    /// A fetch for the given page is in flight.
    Loading { page: u32 },
    /// Results are displayable. `has_more: false` means the result set is
    /// exhausted and further loads are refused.
    Ready { has_more: bool },
}

/// Handle for one outstanding fetch, issued by [`CatalogBrowser::start`] or
/// [`CatalogBrowser::load_more`] and redeemed by [`CatalogBrowser::complete`].
///
/// The embedded epoch ties the fetch to the browse generation that issued
/// it; a ticket from a superseded generation is discarded on completion.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    epoch: u64,
    page: u32,
    params: shelfmark_core::RequestParams,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> &shelfmark_core::RequestParams {
        &self.params
    }
}

/// What became of a completed fetch.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was merged into the record sequence.
    Applied { appended: usize, has_more: bool },
    /// The fetch belonged to a superseded browse generation and was
    /// discarded without touching the record sequence.
    Stale,
}

/// Incremental paginated search over the catalog.
///
/// The browser owns fetch sequencing but performs no I/O itself: `start`
/// and `load_more` hand out a [`FetchTicket`], the caller performs the
/// fetch, and `complete` merges the result. At most one ticket is
/// outstanding at a time; `load_more` while loading returns `None` (the
/// request is dropped, not queued, so scroll handlers re-trigger it).
pub struct CatalogBrowser {
    state: BrowserState,
    records: Vec<MediaRecord>,
    filter: FilterState,
    page: u32,
    epoch: u64,
    pending_scroll: Option<f32>,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBrowser {
    pub fn new() -> Self {
        Self {
            state: BrowserState::Idle,
            records: Vec::new(),
            filter: FilterState::default(),
            page: 0,
            epoch: 0,
            pending_scroll: None,
        }
    }

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// All fetched records in fetch order. Duplicates across page
    /// boundaries are tolerated and passed through.
    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// Records that pass the active filter's client-side predicate, in
    /// fetch order. This is the sequence handed to the renderer.
    pub fn visible_records(&self) -> Vec<&MediaRecord> {
        let pred = self.filter.client_predicate();
        self.records.iter().filter(|r| pred(r)).collect()
    }

    pub fn has_more(&self) -> bool {
        matches!(self.state, BrowserState::Ready { has_more: true })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, BrowserState::Loading { .. })
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Begin a fresh search. Clears accumulated records, supersedes any
    /// in-flight fetch, and returns the ticket for page 1.
    ///
    /// Filter and sort changes always come through here; pages fetched
    /// under different parameters cannot be merged.
    pub fn start(&mut self, filter: FilterState) -> FetchTicket {
        self.epoch += 1;
        self.filter = filter;
        self.records.clear();
        self.page = 1;
        self.pending_scroll = None;
        self.state = BrowserState::Loading { page: 1 };
        FetchTicket {
            epoch: self.epoch,
            page: 1,
            params: self.filter.request_params(),
        }
    }

    /// Request the next page. Returns `None` while a fetch is in flight or
    /// once the result set is exhausted.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        match self.state {
            BrowserState::Ready { has_more: true } => {
                let page = self.page + 1;
                self.state = BrowserState::Loading { page };
                Some(FetchTicket {
                    epoch: self.epoch,
                    page,
                    params: self.filter.request_params(),
                })
            }
            _ => None,
        }
    }

    /// Merge a completed fetch.
    ///
    /// A ticket whose generation was superseded by a later `start` or
    /// `restore` is discarded wholly ([`FetchOutcome::Stale`]), even if it
    /// carried records. A failed fetch keeps the records already shown,
    /// merges nothing, and leaves the browser `Ready` with `has_more`
    /// false so nothing retries automatically; the error is surfaced once.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<MediaRecord>, CatalogError>,
    ) -> Result<FetchOutcome, CatalogError> {
        if ticket.epoch != self.epoch {
            log::warn!(
                "discarding stale fetch for page {} (filters changed mid-flight)",
                ticket.page
            );
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(page_records) => {
                let appended = page_records.len();
                let has_more = appended == PAGE_SIZE;
                if ticket.page == 1 {
                    self.records = page_records;
                } else {
                    self.records.extend(page_records);
                }
                self.page = ticket.page;
                self.state = BrowserState::Ready { has_more };
                Ok(FetchOutcome::Applied { appended, has_more })
            }
            Err(err) => {
                self.state = BrowserState::Ready { has_more: false };
                Err(err)
            }
        }
    }

    /// Snapshot the session for hand-off to the caller, typically taken
    /// when the user selects a record and leaves the result list.
    pub fn snapshot(&self, scroll_position: f32) -> PageCache {
        PageCache {
            records: self.records.clone(),
            current_page: self.page,
            has_more: self.has_more(),
            scroll_position: scroll_position.max(0.0),
            filter: self.filter.clone(),
        }
    }

    /// Re-enter `Ready` directly from a snapshot, without fetching.
    ///
    /// The cache is consumed; scroll restoration is deferred until content
    /// exists again, so the renderer collects it with
    /// [`take_pending_scroll`](Self::take_pending_scroll) after its first
    /// pass. Any in-flight fetch is superseded.
    pub fn restore(&mut self, cache: PageCache) {
        self.epoch += 1;
        self.filter = cache.filter;
        self.records = cache.records;
        self.page = cache.current_page;
        self.state = BrowserState::Ready {
            has_more: cache.has_more,
        };
        self.pending_scroll = Some(cache.scroll_position);
    }

    /// Scroll offset deferred by [`restore`](Self::restore). One-shot:
    /// returns `None` after the first call.
    pub fn take_pending_scroll(&mut self) -> Option<f32> {
        self.pending_scroll.take()
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
