use serde::{Deserialize, Serialize};

use shelfmark_core::{FilterState, MediaRecord};

use crate::error::CatalogError;

/// Snapshot of a browse session: everything needed to re-enter the result
/// list exactly where the user left it.
///
/// Produced by [`CatalogBrowser::snapshot`](crate::CatalogBrowser::snapshot)
/// when the user selects a record; the caller holds it and passes it back
/// to resume, or drops it to start fresh. Restoring consumes the cache, so
/// one snapshot resumes at most one session. Any filter or sort change
/// replaces the snapshot wholesale rather than mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCache {
    /// Fetched records in fetch order; duplicates at page boundaries are
    /// preserved as fetched.
    pub records: Vec<MediaRecord>,
    pub current_page: u32,
    pub has_more: bool,
    pub scroll_position: f32,
    pub filter: FilterState,
}

impl PageCache {
    /// A cache with no records cannot meaningfully resume; resuming from
    /// it falls back to a fresh search.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }
}
