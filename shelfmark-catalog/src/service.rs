use std::future::Future;

use shelfmark_core::{MediaRecord, RequestParams};

use crate::error::CatalogError;

/// Number of records requested per page.
///
/// The service exposes no total count; a returned page shorter than this
/// is the only exhaustion signal.
pub const PAGE_SIZE: usize = 50;

/// Capability to search and fetch records from an external catalog.
///
/// Implementations fetch pages of exactly [`PAGE_SIZE`] records (fewer only
/// on the final page) and full per-record detail including relation and
/// recommendation edges.
pub trait CatalogService {
    /// Fetch one page (1-based) of search results.
    fn search(
        &self,
        params: &RequestParams,
        page: u32,
    ) -> impl Future<Output = Result<Vec<MediaRecord>, CatalogError>>;

    /// Fetch the full record for one catalog id, `None` when unknown.
    fn detail(&self, id: u64) -> impl Future<Output = Result<Option<MediaRecord>, CatalogError>>;
}
