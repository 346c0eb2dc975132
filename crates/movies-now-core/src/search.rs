//! Query-driven movie search.
//!
//! [`SearchDataSource`] turns a stream of query edits into published
//! [`SearchState`] snapshots. Each edit cancels the request started by the
//! previous one, so only the latest query can ever reach the published state.

use movies_now_config::SearchConfig;
use movies_now_models::SearchResult;
use movies_now_sources::MovieSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Snapshot of the search as the view layer should render it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub movies: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Coarse phase derived from a [`SearchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Results,
    Failed,
}

impl SearchState {
    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Searching
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.movies.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Results
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub min_query_length: usize,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_length: 3,
            debounce: Duration::ZERO,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            min_query_length: config.min_query_length,
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}

pub struct SearchDataSource {
    source: Arc<dyn MovieSource>,
    options: SearchOptions,
    state: Arc<watch::Sender<SearchState>>,
    inflight: Option<CancellationToken>,
}

impl SearchDataSource {
    pub fn new(source: Arc<dyn MovieSource>, options: SearchOptions) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            source,
            options,
            state: Arc::new(state),
            inflight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Apply a query edit.
    ///
    /// Must be called from within a tokio runtime when the query is long
    /// enough to trigger a request.
    pub fn set_query(&mut self, query: &str) {
        let previous = self.inflight.take();
        let query = query.to_string();

        if query.chars().count() < self.options.min_query_length {
            self.state.send_modify(|state| {
                if let Some(token) = &previous {
                    token.cancel();
                }
                state.query = query;
                state.movies.clear();
                state.error = None;
                state.loading = false;
            });
            return;
        }

        let token = CancellationToken::new();
        self.state.send_modify(|state| {
            if let Some(token) = &previous {
                token.cancel();
            }
            state.query = query.clone();
            state.loading = true;
            state.error = None;
        });
        self.inflight = Some(token.clone());

        debug!("Starting search for '{}'", query);
        tokio::spawn(run_search(
            Arc::clone(&self.source),
            Arc::clone(&self.state),
            token,
            query,
            self.options.debounce,
        ));
    }

    /// Wait until the current query has settled (no request in flight).
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl Drop for SearchDataSource {
    fn drop(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }
}

async fn run_search(
    source: Arc<dyn MovieSource>,
    state: Arc<watch::Sender<SearchState>>,
    token: CancellationToken,
    query: String,
    debounce: Duration,
) {
    let request = async {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        source.search(&query).await
    };

    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Search for '{}' cancelled", query);
            return;
        }
        outcome = request => outcome,
    };

    // The token is cancelled under the same lock, so a superseded response
    // is dropped here rather than published.
    state.send_if_modified(|state| {
        if token.is_cancelled() {
            return false;
        }
        match outcome {
            Ok(movies) => {
                info!("Search for '{}' returned {} movies", query, movies.len());
                state.movies = movies;
                state.error = None;
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                state.movies.clear();
                state.error = Some(e.to_string());
            }
        }
        state.loading = false;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{result, Canned, FakeSource};

    fn data_source(fake: &Arc<FakeSource>) -> SearchDataSource {
        SearchDataSource::new(fake.clone(), SearchOptions::default())
    }

    #[tokio::test]
    async fn test_short_query_issues_no_request() {
        let fake = FakeSource::new();
        let mut search = data_source(&fake);

        search.set_query("av");
        let state = search.settled().await;

        assert!(state.movies.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert!(fake.search_calls().is_empty());
        assert_eq!(state.phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_short_query_counts_characters() {
        let fake = FakeSource::new();
        let mut search = data_source(&fake);

        // Two characters, six bytes
        search.set_query("éé");
        search.settled().await;
        assert!(fake.search_calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_search() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::Ok(vec![result("tt1", "Avengers")]));
        let mut search = data_source(&fake);

        search.set_query("avengers");
        assert!(search.state().loading);
        let state = search.settled().await;

        assert_eq!(state.movies, vec![result("tt1", "Avengers")]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), SearchPhase::Results);
    }

    #[tokio::test]
    async fn test_no_results_sets_error() {
        let fake = FakeSource::new();
        fake.with_search("zzzzzxxx", Canned::NotFound);
        let mut search = data_source(&fake);

        search.set_query("zzzzzxxx");
        let state = search.settled().await;

        assert!(state.movies.is_empty());
        assert_eq!(state.error.as_deref(), Some("No Movie Found"));
        assert_eq!(state.phase(), SearchPhase::Failed);
    }

    #[tokio::test]
    async fn test_http_failure_sets_generic_error() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::ServerError);
        let mut search = data_source(&fake);

        search.set_query("avengers");
        let state = search.settled().await;

        assert_eq!(state.error.as_deref(), Some("Something went wrong while fetching movies"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_error_cleared_by_short_query() {
        let fake = FakeSource::new();
        fake.with_search("zzzzzxxx", Canned::NotFound);
        let mut search = data_source(&fake);

        search.set_query("zzzzzxxx");
        search.settled().await;
        search.set_query("zz");

        let state = search.state();
        assert_eq!(state.error, None);
        assert!(state.movies.is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_never_overwrites_newer_query() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::Ok(vec![result("tt1", "Avengers")]));
        fake.with_search("batman", Canned::Ok(vec![result("tt2", "Batman")]));
        fake.gate("avengers");
        fake.gate("batman");
        let mut search = data_source(&fake);

        search.set_query("avengers");
        tokio::task::yield_now().await;
        search.set_query("batman");
        tokio::task::yield_now().await;

        // Newer query answers first, the older one afterwards
        fake.release("batman");
        let state = search.settled().await;
        assert_eq!(state.movies, vec![result("tt2", "Batman")]);

        fake.release("avengers");
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let state = search.state();
        assert_eq!(state.query, "batman");
        assert_eq!(state.movies, vec![result("tt2", "Batman")]);
    }

    #[tokio::test]
    async fn test_cancelled_request_leaves_state_untouched() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::NotFound);
        fake.gate("avengers");
        let mut search = data_source(&fake);

        search.set_query("avengers");
        tokio::task::yield_now().await;
        search.set_query("av");
        fake.release("avengers");
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let state = search.state();
        assert_eq!(state.error, None, "cancellation must be silent");
        assert!(!state.loading);
        assert_eq!(state.query, "av");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_skips_superseded_queries() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::Ok(vec![result("tt1", "Avengers")]));
        let mut search = SearchDataSource::new(
            fake.clone(),
            SearchOptions {
                min_query_length: 3,
                debounce: Duration::from_millis(300),
            },
        );

        search.set_query("ave");
        search.set_query("aven");
        search.set_query("avengers");
        let state = search.settled().await;

        assert_eq!(fake.search_calls(), vec!["avengers".to_string()]);
        assert_eq!(state.movies.len(), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels_inflight_request() {
        let fake = FakeSource::new();
        fake.with_search("avengers", Canned::Ok(vec![result("tt1", "Avengers")]));
        fake.gate("avengers");
        let mut search = data_source(&fake);
        let rx = search.subscribe();

        search.set_query("avengers");
        drop(search);
        fake.release("avengers");
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(rx.borrow().movies.is_empty());
    }
}
