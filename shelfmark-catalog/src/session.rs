use shelfmark_core::{FilterState, MediaRecord};

use crate::browser::{CatalogBrowser, FetchOutcome, FetchTicket};
use crate::cache::PageCache;
use crate::error::CatalogError;
use crate::service::CatalogService;
use crate::viewport::Viewport;

/// A browse session: a [`CatalogBrowser`] bound to a [`CatalogService`].
///
/// The session runs on one cooperative context; it awaits only at the
/// service boundary and never has more than one fetch in flight.
pub struct CatalogSession<S> {
    service: S,
    browser: CatalogBrowser,
}

impl<S: CatalogService> CatalogSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            browser: CatalogBrowser::new(),
        }
    }

    pub fn browser(&self) -> &CatalogBrowser {
        &self.browser
    }

    pub fn records(&self) -> &[MediaRecord] {
        self.browser.records()
    }

    pub fn visible_records(&self) -> Vec<&MediaRecord> {
        self.browser.visible_records()
    }

    pub fn has_more(&self) -> bool {
        self.browser.has_more()
    }

    /// Begin a fresh search and fetch its first page. Returns the number
    /// of records merged.
    pub async fn start(&mut self, filter: FilterState) -> Result<usize, CatalogError> {
        let ticket = self.browser.start(filter);
        self.dispatch(ticket).await
    }

    /// Fetch the next page if one may exist. A no-op returning 0 while a
    /// fetch is in flight or after exhaustion.
    pub async fn load_more(&mut self) -> Result<usize, CatalogError> {
        match self.browser.load_more() {
            Some(ticket) => self.dispatch(ticket).await,
            None => Ok(0),
        }
    }

    /// Keep fetching until the rendered records overflow the viewport or
    /// the result set is exhausted. Called after every render pass so a
    /// partially-filled screen never reads as "no more results".
    pub async fn fill_viewport(&mut self, viewport: Viewport) -> Result<usize, CatalogError> {
        let mut appended = 0;
        while self.browser.has_more() && !viewport.is_filled(self.browser.records().len()) {
            match self.browser.load_more() {
                Some(ticket) => appended += self.dispatch(ticket).await?,
                None => break,
            }
        }
        Ok(appended)
    }

    /// Snapshot the session for hand-off; see [`PageCache`].
    pub fn snapshot(&self, scroll_position: f32) -> PageCache {
        self.browser.snapshot(scroll_position)
    }

    /// Resume from a snapshot. A cache with records re-enters the result
    /// list without fetching; an empty cache (or one already spent) falls
    /// back to a fresh search under the cache's filter.
    pub async fn resume(&mut self, cache: PageCache) -> Result<(), CatalogError> {
        if cache.is_empty() {
            let filter = cache.filter;
            self.start(filter).await?;
        } else {
            self.browser.restore(cache);
        }
        Ok(())
    }

    /// Scroll offset deferred by [`resume`](Self::resume), surfaced once
    /// after the first render.
    pub fn take_pending_scroll(&mut self) -> Option<f32> {
        self.browser.take_pending_scroll()
    }

    async fn dispatch(&mut self, ticket: FetchTicket) -> Result<usize, CatalogError> {
        let result = self.service.search(ticket.params(), ticket.page()).await;
        match self.browser.complete(ticket, result)? {
            FetchOutcome::Applied { appended, .. } => Ok(appended),
            FetchOutcome::Stale => Ok(0),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
