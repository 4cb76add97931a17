use crate::catalog::{Catalog, CatalogError, City};
use crate::filter::{CityFilter, FilterUpdate};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Phase of the listing state machine
///
/// `Idle -> Loading -> {Loaded, Failed}`; a retry from `Failed` and any
/// filter mutation or load-more from `Loaded` re-enter `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last request succeeded
    Loaded,
    /// The last request failed; the filter is intact and a retry will reuse it
    Failed,
}

/// Outcome of a [`ListController::load_more`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    /// This many cities were appended after the existing ones
    Appended(usize),
    /// No further page exists; no request was issued
    NoMore,
    /// A newer request superseded this one; its response was discarded
    Superseded,
}

/// Immutable view of the controller state for rendering
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub cities: Vec<City>,
    pub count: u64,
    pub has_next: bool,
    pub phase: ListPhase,
    pub filter: CityFilter,
}

struct ListInner {
    filter: CityFilter,
    cities: Vec<City>,
    count: u64,
    has_next: bool,
    phase: ListPhase,
    // Monotonic tag of the most recently dispatched request; responses
    // carrying an older tag are discarded instead of overwriting newer state.
    latest_seq: u64,
}

/// Owns the filter and the visible, paginated city list
///
/// All state lives behind one lock so cloned handles can be driven from
/// spawned event handlers; the lock is never held across a network await.
pub struct ListController<C: Catalog> {
    catalog: Arc<C>,
    inner: Arc<Mutex<ListInner>>,
}

impl<C: Catalog> Clone for ListController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Catalog> ListController<C> {
    /// Create a controller with an empty filter of the given page size
    pub fn new(catalog: Arc<C>, page_size: u32) -> Self {
        Self {
            catalog,
            inner: Arc::new(Mutex::new(ListInner {
                filter: CityFilter::new(page_size),
                cities: Vec::new(),
                count: 0,
                has_next: false,
                phase: ListPhase::Idle,
                latest_seq: 0,
            })),
        }
    }

    /// Merge a partial filter update and reload the first page
    pub async fn set_filter(&self, update: FilterUpdate) -> Result<(), CatalogError> {
        {
            let mut inner = self.inner.lock().await;
            inner.filter.apply(update);
        }
        self.reload().await
    }

    /// Clear every filter field and reload
    pub async fn clear_filters(&self) -> Result<(), CatalogError> {
        {
            let mut inner = self.inner.lock().await;
            inner.filter.reset();
        }
        self.reload().await
    }

    /// Replace the visible list with a fresh first-page-onwards query
    ///
    /// The previous items are discarded at dispatch, not at resolution. On
    /// failure the controller enters `Failed` with the filter intact, so
    /// [`retry`](Self::retry) reissues the same query.
    pub async fn reload(&self) -> Result<(), CatalogError> {
        let (filter, seq) = {
            let mut inner = self.inner.lock().await;
            inner.cities.clear();
            inner.phase = ListPhase::Loading;
            inner.latest_seq += 1;
            (inner.filter.clone(), inner.latest_seq)
        };

        let result = self.catalog.list_cities(&filter).await;

        let mut inner = self.inner.lock().await;
        if inner.latest_seq != seq {
            ::log::debug!("discarding stale list response (seq {})", seq);
            return Ok(());
        }

        match result {
            Ok(page) => {
                ::log::info!(
                    "loaded {} of {} cities (has_next: {})",
                    page.cities.len(),
                    page.count,
                    page.has_next
                );
                inner.cities = page.cities;
                inner.count = page.count;
                inner.has_next = page.has_next;
                inner.phase = ListPhase::Loaded;
                Ok(())
            }
            Err(e) => {
                ::log::warn!("city list load failed: {}", e);
                inner.phase = ListPhase::Failed;
                Err(e)
            }
        }
    }

    /// Reissue the last query after a failure
    pub async fn retry(&self) -> Result<(), CatalogError> {
        self.reload().await
    }

    /// Fetch the next page and append it after the existing items
    ///
    /// A no-op when no further page exists. Unlike [`reload`](Self::reload),
    /// the current items stay visible until the append resolves. On failure
    /// the page increment is rolled back so a retry refetches the same page.
    pub async fn load_more(&self) -> Result<LoadMoreOutcome, CatalogError> {
        let (filter, seq) = {
            let mut inner = self.inner.lock().await;
            if !inner.has_next {
                return Ok(LoadMoreOutcome::NoMore);
            }
            inner.filter.page += 1;
            inner.phase = ListPhase::Loading;
            inner.latest_seq += 1;
            (inner.filter.clone(), inner.latest_seq)
        };

        let result = self.catalog.list_cities(&filter).await;

        let mut inner = self.inner.lock().await;
        if inner.latest_seq != seq {
            ::log::debug!("discarding stale load-more response (seq {})", seq);
            return Ok(LoadMoreOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                let appended = page.cities.len();
                inner.cities.extend(page.cities);
                inner.count = page.count;
                inner.has_next = page.has_next;
                inner.phase = ListPhase::Loaded;
                Ok(LoadMoreOutcome::Appended(appended))
            }
            Err(e) => {
                ::log::warn!("load more failed on page {}: {}", filter.page, e);
                inner.filter.page -= 1;
                inner.phase = ListPhase::Failed;
                Err(e)
            }
        }
    }

    /// Current filter (mainly for wiring and tests)
    pub async fn filter(&self) -> CityFilter {
        self.inner.lock().await.filter.clone()
    }

    /// Clone out the state needed to render the list
    pub async fn snapshot(&self) -> ListSnapshot {
        let inner = self.inner.lock().await;
        ListSnapshot {
            cities: inner.cities.clone(),
            count: inner.count,
            has_next: inner.has_next,
            phase: inner.phase,
            filter: inner.filter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::{MockCatalog, page};
    use tokio::sync::Notify;

    fn controller(catalog: &Arc<MockCatalog>) -> ListController<MockCatalog> {
        ListController::new(Arc::clone(catalog), 6)
    }

    #[tokio::test]
    async fn test_set_filter_resets_page_and_reloads() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..6, 20, true))).await;
        let list = controller(&catalog);

        // Simulate having paged ahead before the filter change
        list.inner.lock().await.filter.page = 3;

        list.set_filter(FilterUpdate::new().with_search("goa"))
            .await
            .unwrap();

        assert_eq!(list.filter().await.page, 1);
        let calls = catalog.list_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].search, "goa");
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn test_reload_replaces_items() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..6, 20, true))).await;
        catalog.push_list(Ok(page(10..13, 3, false))).await;
        let list = controller(&catalog);

        list.reload().await.unwrap();
        assert_eq!(list.snapshot().await.cities.len(), 6);

        list.reload().await.unwrap();
        let snap = list.snapshot().await;
        assert_eq!(snap.cities.len(), 3);
        assert_eq!(snap.cities[0].id, 10);
        assert_eq!(snap.count, 3);
        assert!(!snap.has_next);
        assert_eq!(snap.phase, ListPhase::Loaded);
    }

    #[tokio::test]
    async fn test_load_more_appends_in_order() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..6, 20, true))).await;
        catalog.push_list(Ok(page(6..12, 20, true))).await;
        let list = controller(&catalog);

        list.reload().await.unwrap();
        let outcome = list.load_more().await.unwrap();
        assert_eq!(outcome, LoadMoreOutcome::Appended(6));

        let snap = list.snapshot().await;
        assert_eq!(snap.cities.len(), 12);
        let ids: Vec<u64> = snap.cities.iter().map(|c| c.id).collect();
        assert_eq!(ids, (0..12).collect::<Vec<u64>>());
        assert_eq!(list.filter().await.page, 2);

        let calls = catalog.list_calls().await;
        assert_eq!(calls[1].page, 2);
    }

    #[tokio::test]
    async fn test_load_more_without_next_is_a_noop() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..3, 3, false))).await;
        let list = controller(&catalog);

        list.reload().await.unwrap();
        let outcome = list.load_more().await.unwrap();
        assert_eq!(outcome, LoadMoreOutcome::NoMore);

        // Item count unchanged and no second request issued
        assert_eq!(list.snapshot().await.cities.len(), 3);
        assert_eq!(catalog.list_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_filter_and_enters_failed() {
        let catalog = Arc::new(MockCatalog::new());
        catalog
            .push_list(Err(CatalogError::Api("backend down".to_string())))
            .await;
        catalog.push_list(Ok(page(0..6, 6, false))).await;
        let list = controller(&catalog);

        list.set_filter(FilterUpdate::new().with_search("goa"))
            .await
            .unwrap_err();

        let snap = list.snapshot().await;
        assert_eq!(snap.phase, ListPhase::Failed);
        assert_eq!(snap.filter.search, "goa");

        // Retry reuses the intact filter
        list.retry().await.unwrap();
        let calls = catalog.list_calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].search, "goa");
        assert_eq!(list.snapshot().await.phase, ListPhase::Loaded);
    }

    #[tokio::test]
    async fn test_load_more_failure_rolls_back_page() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..6, 20, true))).await;
        catalog
            .push_list(Err(CatalogError::Api("timeout".to_string())))
            .await;
        let list = controller(&catalog);

        list.reload().await.unwrap();
        list.load_more().await.unwrap_err();

        let snap = list.snapshot().await;
        assert_eq!(snap.phase, ListPhase::Failed);
        assert_eq!(snap.filter.page, 1);
        // Prior items survive a failed append
        assert_eq!(snap.cities.len(), 6);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let catalog = Arc::new(MockCatalog::new());
        let gate = Arc::new(Notify::new());
        catalog
            .push_list_gated(Arc::clone(&gate), Ok(page(0..6, 20, true)))
            .await;
        catalog.push_list(Ok(page(50..56, 6, false))).await;
        let list = controller(&catalog);

        // The first reload is held in flight while a second one dispatches
        // and resolves; the late response must not overwrite the newer state.
        let stale = {
            let list = list.clone();
            tokio::spawn(async move { list.reload().await })
        };
        tokio::task::yield_now().await;
        assert!(!stale.is_finished());

        list.reload().await.unwrap();
        assert_eq!(list.snapshot().await.cities[0].id, 50);

        // Releasing the held response now must leave the newer state alone
        gate.notify_one();
        stale.await.unwrap().unwrap();

        let snap = list.snapshot().await;
        assert_eq!(snap.cities[0].id, 50);
        assert!(!snap.has_next);
        assert_eq!(snap.phase, ListPhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search_issues_single_query() {
        use crate::debounce::DebouncedInput;
        use std::time::Duration;
        use tokio::time::advance;

        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(0..6, 6, false))).await;
        let list = controller(&catalog);

        // Keystroke burst; only the value standing at the end of the quiet
        // window reaches the catalog.
        let (mut search, mut rx) = DebouncedInput::new(Duration::from_millis(500));
        search.input("g");
        advance(Duration::from_millis(100)).await;
        search.input("go");
        advance(Duration::from_millis(100)).await;
        search.input("goa");

        let value = rx.recv().await.unwrap();
        list.set_filter(FilterUpdate::new().with_search(value))
            .await
            .unwrap();

        let calls = catalog.list_calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].search, "goa");
    }

    #[tokio::test]
    async fn test_paginated_scenario() {
        // Filter{page:1, limit:6} -> 6 of 20 with more -> load_more -> 12 shown
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_list(Ok(page(1..7, 20, true))).await;
        catalog.push_list(Ok(page(7..13, 20, true))).await;
        let list = controller(&catalog);

        list.reload().await.unwrap();
        assert_eq!(list.snapshot().await.cities.len(), 6);

        list.load_more().await.unwrap();
        let snap = list.snapshot().await;
        assert_eq!(snap.cities.len(), 12);
        assert!(snap.has_next);
        assert_eq!(snap.count, 20);
        assert_eq!(list.filter().await.page, 2);
    }
}
