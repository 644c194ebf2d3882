use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;
use crate::service::PAGE_SIZE;
use shelfmark_core::RequestParams;

/// Catalog fake that serves a scripted sequence of page results and
/// records which pages were requested.
struct ScriptedService {
    pages: RefCell<VecDeque<Result<Vec<MediaRecord>, CatalogError>>>,
    calls: RefCell<Vec<u32>>,
}

impl ScriptedService {
    fn new(pages: Vec<Result<Vec<MediaRecord>, CatalogError>>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

impl CatalogService for &ScriptedService {
    async fn search(
        &self,
        _params: &RequestParams,
        page: u32,
    ) -> Result<Vec<MediaRecord>, CatalogError> {
        self.calls.borrow_mut().push(page);
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn detail(&self, _id: u64) -> Result<Option<MediaRecord>, CatalogError> {
        Ok(None)
    }
}

fn record(id: u64) -> MediaRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": { "romaji": format!("Record {id}") }
    }))
    .unwrap()
}

fn full_page(start_id: u64) -> Result<Vec<MediaRecord>, CatalogError> {
    Ok((0..PAGE_SIZE as u64).map(|i| record(start_id + i)).collect())
}

fn short_page(start_id: u64, len: usize) -> Result<Vec<MediaRecord>, CatalogError> {
    Ok((0..len as u64).map(|i| record(start_id + i)).collect())
}

#[tokio::test]
async fn test_backfill_until_viewport_overflows() {
    let service = ScriptedService::new(vec![full_page(0), full_page(50), full_page(100)]);
    let mut session = CatalogSession::new(&service);

    session.start(FilterState::default()).await.unwrap();
    assert_eq!(session.records().len(), PAGE_SIZE);

    // 60 visible rows: one page is not enough, two are.
    session.fill_viewport(Viewport::rows(60)).await.unwrap();
    assert_eq!(session.records().len(), 2 * PAGE_SIZE);
    assert_eq!(service.calls(), vec![1, 2]);
}

#[tokio::test]
async fn test_backfill_stops_at_exhaustion() {
    let service = ScriptedService::new(vec![full_page(0), full_page(50), short_page(100, 10)]);
    let mut session = CatalogSession::new(&service);

    session.start(FilterState::default()).await.unwrap();
    // The viewport wants more rows than the catalog has.
    session.fill_viewport(Viewport::rows(500)).await.unwrap();

    assert_eq!(session.records().len(), 110);
    assert!(!session.has_more());
    assert_eq!(service.calls(), vec![1, 2, 3]);

    // Exhausted: another backfill pass issues no fetches.
    session.fill_viewport(Viewport::rows(500)).await.unwrap();
    assert_eq!(service.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_failure_surfaces_once_and_stops_retrying() {
    let service = ScriptedService::new(vec![
        full_page(0),
        Err(CatalogError::Api {
            status: 503,
            message: "unavailable".into(),
        }),
    ]);
    let mut session = CatalogSession::new(&service);

    session.start(FilterState::default()).await.unwrap();
    assert!(session.load_more().await.is_err());

    // Records shown so far survive; nothing retries automatically.
    assert_eq!(session.records().len(), PAGE_SIZE);
    assert!(!session.has_more());
    assert_eq!(session.load_more().await.unwrap(), 0);
    assert_eq!(service.calls(), vec![1, 2]);
}

#[tokio::test]
async fn test_resume_replays_snapshot_without_fetching() {
    let service = ScriptedService::new(vec![short_page(0, 30)]);
    let mut session = CatalogSession::new(&service);
    session
        .start(FilterState {
            query: Some("dungeon".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let cache = session.snapshot(512.0);

    let fresh_service = ScriptedService::new(vec![]);
    let mut resumed = CatalogSession::new(&fresh_service);
    resumed.resume(cache).await.unwrap();

    assert!(fresh_service.calls().is_empty());
    assert_eq!(resumed.records().len(), 30);
    assert_eq!(resumed.browser().filter().query.as_deref(), Some("dungeon"));
    assert_eq!(resumed.take_pending_scroll(), Some(512.0));
    assert_eq!(resumed.take_pending_scroll(), None);
}

#[tokio::test]
async fn test_resume_from_spent_cache_starts_fresh() {
    // A snapshot taken before anything loaded carries no records; resuming
    // from it must behave exactly like a new search.
    let service = ScriptedService::new(vec![short_page(0, 5)]);
    let mut session = CatalogSession::new(&service);

    let empty = CatalogSession::new(&ScriptedService::new(vec![])).snapshot(0.0);
    assert!(empty.is_empty());

    session.resume(empty).await.unwrap();
    assert_eq!(service.calls(), vec![1]);
    assert_eq!(session.records().len(), 5);
    assert_eq!(session.take_pending_scroll(), None);
}

#[test]
fn test_page_cache_json_round_trip() {
    let mut browser = CatalogBrowser::new();
    let ticket = browser.start(FilterState {
        finished_only: true,
        ..Default::default()
    });
    browser
        .complete(ticket, Ok(vec![record(7), record(8)]))
        .unwrap();

    let cache = browser.snapshot(33.0);
    let json = cache.to_json().unwrap();
    let back = PageCache::from_json(&json).unwrap();
    assert_eq!(back.records.len(), 2);
    assert_eq!(back.records[0].id, 7);
    assert_eq!(back.current_page, 1);
    assert!(!back.has_more);
    assert_eq!(back.scroll_position, 33.0);
    assert!(back.filter.finished_only);
}
