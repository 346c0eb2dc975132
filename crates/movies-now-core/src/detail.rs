//! Detail fetch for the selected movie.
//!
//! Uses the same cancellation discipline as the search: selecting another
//! movie (or none) cancels the pending fetch, and a cancelled fetch never
//! touches the published [`DetailState`]. While a titled record is shown the
//! document title points at it.

use movies_now_models::MovieDetail;
use movies_now_sources::MovieSource;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::title::{DocumentTitle, TitleGuard};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub selected: Option<String>,
    pub movie: Option<MovieDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

type TitleSlot = Arc<Mutex<Option<TitleGuard>>>;

pub struct DetailDataSource {
    source: Arc<dyn MovieSource>,
    state: Arc<watch::Sender<DetailState>>,
    title_sink: Arc<dyn DocumentTitle>,
    title: TitleSlot,
    inflight: Option<CancellationToken>,
}

impl DetailDataSource {
    pub fn new(source: Arc<dyn MovieSource>, title_sink: Arc<dyn DocumentTitle>) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            source,
            state: Arc::new(state),
            title_sink,
            title: Arc::new(Mutex::new(None)),
            inflight: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Point the detail view at `imdb_id`, or tear it down with `None`.
    ///
    /// Reselecting the id that is already shown is a no-op.
    pub fn select(&mut self, imdb_id: Option<&str>) {
        if self.state.borrow().selected.as_deref() == imdb_id {
            return;
        }

        let previous = self.inflight.take();
        let title = Arc::clone(&self.title);

        let Some(imdb_id) = imdb_id.map(str::to_string) else {
            self.state.send_modify(|state| {
                if let Some(token) = &previous {
                    token.cancel();
                }
                release_title(&title);
                *state = DetailState::default();
            });
            return;
        };

        let token = CancellationToken::new();
        self.state.send_modify(|state| {
            if let Some(token) = &previous {
                token.cancel();
            }
            release_title(&title);
            *state = DetailState {
                selected: Some(imdb_id.clone()),
                movie: None,
                loading: true,
                error: None,
            };
        });
        self.inflight = Some(token.clone());

        debug!("Fetching details for {}", imdb_id);
        tokio::spawn(run_fetch(
            Arc::clone(&self.source),
            Arc::clone(&self.state),
            Arc::clone(&self.title_sink),
            title,
            token,
            imdb_id,
        ));
    }

    /// Wait until the current selection has finished loading.
    pub async fn settled(&self) -> DetailState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl Drop for DetailDataSource {
    fn drop(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
        release_title(&self.title);
    }
}

fn release_title(slot: &TitleSlot) {
    let guard = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    drop(guard);
}

async fn run_fetch(
    source: Arc<dyn MovieSource>,
    state: Arc<watch::Sender<DetailState>>,
    title_sink: Arc<dyn DocumentTitle>,
    title: TitleSlot,
    token: CancellationToken,
    imdb_id: String,
) {
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Detail fetch for {} cancelled", imdb_id);
            return;
        }
        outcome = source.movie_detail(&imdb_id) => outcome,
    };

    state.send_if_modified(|state| {
        if token.is_cancelled() {
            return false;
        }
        match outcome {
            Ok(movie) => {
                if let Some(movie_title) = movie.display_title() {
                    let mut slot = title.lock().unwrap_or_else(PoisonError::into_inner);
                    drop(slot.take());
                    *slot = Some(TitleGuard::acquire(Arc::clone(&title_sink), movie_title));
                }
                state.movie = Some(movie);
                state.error = None;
            }
            Err(e) => {
                warn!("Detail fetch for {} failed: {}", imdb_id, e);
                state.movie = None;
                state.error = Some(e.to_string());
            }
        }
        state.loading = false;
        true
    });
}
