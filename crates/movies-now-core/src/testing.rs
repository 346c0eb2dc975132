//! In-memory movie source for exercising the data sources without a network.

use async_trait::async_trait;
use movies_now_models::{MovieDetail, SearchResult};
use movies_now_sources::error::StatusCode;
use movies_now_sources::{MovieSource, SourceError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Clone)]
pub(crate) enum Canned<T> {
    Ok(T),
    NotFound,
    ServerError,
    Upstream(&'static str),
}

impl<T: Clone> Canned<T> {
    fn materialize(&self) -> Result<T, SourceError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::NotFound => Err(SourceError::NotFound),
            Canned::ServerError => Err(SourceError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            Canned::Upstream(msg) => Err(SourceError::Upstream(msg.to_string())),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeSource {
    searches: Mutex<HashMap<String, Canned<Vec<SearchResult>>>>,
    details: Mutex<HashMap<String, Canned<MovieDetail>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_search(&self, query: &str, response: Canned<Vec<SearchResult>>) {
        self.searches.lock().unwrap().insert(query.to_string(), response);
    }

    pub(crate) fn with_detail(&self, imdb_id: &str, response: Canned<MovieDetail>) {
        self.details.lock().unwrap().insert(imdb_id.to_string(), response);
    }

    /// Hold responses for `key` (a query or an id) until `release` is called.
    pub(crate) fn gate(&self, key: &str) {
        self.gates.lock().unwrap().insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub(crate) fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.add_permits(1);
        }
    }

    pub(crate) fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    async fn wait_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        self.wait_gate(query).await;
        let canned = self.searches.lock().unwrap().get(query).cloned();
        canned.unwrap_or(Canned::NotFound).materialize()
    }

    async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        self.detail_calls.lock().unwrap().push(imdb_id.to_string());
        self.wait_gate(imdb_id).await;
        let canned = self.details.lock().unwrap().get(imdb_id).cloned();
        canned
            .unwrap_or(Canned::Upstream("Incorrect IMDb ID."))
            .materialize()
    }
}

pub(crate) fn result(imdb_id: &str, title: &str) -> SearchResult {
    SearchResult {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2012".to_string(),
        poster: None,
    }
}

pub(crate) fn detail(imdb_id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2012".to_string(),
        runtime_minutes: Some(143),
        imdb_rating: Some(8.0),
        plot: Some("Heroes assemble.".to_string()),
        director: Some("Joss Whedon".to_string()),
        ..MovieDetail::default()
    }
}
