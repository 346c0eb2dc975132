//! Interaction state for the whole application.
//!
//! [`App`] is the single owner of everything the user can change: the query,
//! the selection, the rating in progress, focus, panel visibility and the
//! persisted watch list. Front ends feed it events and render the
//! [`ResultsView`] / [`DetailView`] snapshots it derives.

use movies_now_models::{MovieDetail, SearchResult, WatchSummary, WatchedMovie};
use movies_now_sources::MovieSource;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::detail::{DetailDataSource, DetailState};
use crate::rating::{RatingError, StarRating};
use crate::search::{SearchDataSource, SearchOptions, SearchState};
use crate::store::{ListStore, PersistentList};
use crate::title::DocumentTitle;

pub const DELETE_CONFIRMATION: &str = "Confirm to delete?";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No movie is selected")]
    NoSelection,
    #[error("Movie details have not loaded yet")]
    DetailNotLoaded,
    #[error("Pick a rating first")]
    RatingNotChosen,
    #[error("{0} is already in your watched list")]
    AlreadyWatched(String),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error("Failed to save watched list: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Asks the user to confirm a destructive action.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Which input currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    SearchField,
    OtherInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Results,
    Watched,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Collapsed,
    Prompt,
    Loading,
    Movies(Vec<SearchResult>),
    Error(String),
    /// Query too short to search, or nothing to show
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingView {
    AlreadyRated(u8),
    Pending { chosen: u8, can_add: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Collapsed,
    Summary {
        summary: WatchSummary,
        watched: Vec<WatchedMovie>,
    },
    Loading,
    Failed(String),
    Movie {
        movie: MovieDetail,
        rating: RatingView,
    },
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub search: SearchOptions,
    pub watched_key: String,
    pub max_rating: u8,
    pub star_size: u16,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            watched_key: "watched".to_string(),
            max_rating: 10,
            star_size: 24,
        }
    }
}

pub struct App {
    options: AppOptions,
    query: String,
    search: SearchDataSource,
    detail: DetailDataSource,
    selected: Option<String>,
    watched: PersistentList<WatchedMovie>,
    rating: StarRating,
    count_rating_decisions: u32,
    focus: Focus,
    results_open: bool,
    watched_open: bool,
}

impl App {
    pub fn new(
        source: Arc<dyn MovieSource>,
        store: ListStore,
        title: Arc<dyn DocumentTitle>,
        options: AppOptions,
    ) -> Self {
        let watched = PersistentList::open(store, options.watched_key.clone());
        info!("Loaded {} watched movies", watched.len());

        Self {
            search: SearchDataSource::new(Arc::clone(&source), options.search.clone()),
            detail: DetailDataSource::new(source, title),
            rating: new_rating_widget(&options),
            options,
            query: String::new(),
            selected: None,
            watched,
            count_rating_decisions: 0,
            focus: Focus::None,
            results_open: true,
            watched_open: true,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.search.set_query(query);
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub async fn search_settled(&self) -> SearchState {
        self.search.settled().await
    }

    pub async fn detail_settled(&self) -> DetailState {
        self.detail.settled().await
    }

    pub fn num_results(&self) -> usize {
        self.search.state().movies.len()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Toggle selection: picking the open movie again closes it.
    pub fn select_movie(&mut self, imdb_id: &str) {
        if self.selected.as_deref() == Some(imdb_id) {
            self.close_movie();
            return;
        }
        debug!("Selected {}", imdb_id);
        self.selected = Some(imdb_id.to_string());
        self.reset_rating();
        self.detail.select(Some(imdb_id));
    }

    pub fn close_movie(&mut self) {
        if self.selected.take().is_some() {
            debug!("Closed movie details");
        }
        self.reset_rating();
        self.detail.select(None);
    }

    pub fn rating_widget(&self) -> &StarRating {
        &self.rating
    }

    /// Record the user's pick. Each change of value counts as one decision.
    pub fn set_user_rating(&mut self, value: u8) -> Result<u8, AppError> {
        let previous = self.rating.rating();
        let value = self.rating.rate(value)?;
        if value != previous {
            self.count_rating_decisions += 1;
        }
        Ok(value)
    }

    pub fn count_rating_decisions(&self) -> u32 {
        self.count_rating_decisions
    }

    pub fn watched(&self) -> &[WatchedMovie] {
        self.watched.items()
    }

    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched.iter().any(|m| m.imdb_id == imdb_id)
    }

    pub fn watched_rating(&self, imdb_id: &str) -> Option<u8> {
        self.watched
            .iter()
            .find(|m| m.imdb_id == imdb_id)
            .map(|m| m.user_rating)
    }

    pub fn summary(&self) -> WatchSummary {
        WatchSummary::from_watched(self.watched.items())
    }

    /// Save the open movie with the picked rating and close it.
    pub fn add_watched(&mut self) -> Result<WatchedMovie, AppError> {
        let selected = self.selected.clone().ok_or(AppError::NoSelection)?;

        if self.is_watched(&selected) {
            return Err(AppError::AlreadyWatched(selected));
        }
        if !self.rating.is_rated() {
            return Err(AppError::RatingNotChosen);
        }

        // The published record always belongs to the current selection, but
        // upstream may spell the id differently than the user did
        let state = self.detail.state();
        if state.selected.as_deref() != Some(selected.as_str()) {
            return Err(AppError::DetailNotLoaded);
        }
        let movie = state.movie.ok_or(AppError::DetailNotLoaded)?;

        let mut watched = WatchedMovie::from_detail(&movie, self.rating.rating(), self.count_rating_decisions);
        watched.imdb_id = selected;
        self.watched.push(watched.clone())?;
        info!(
            "Added {} ({}) to watched list with rating {}",
            watched.title, watched.imdb_id, watched.user_rating
        );

        self.close_movie();
        Ok(watched)
    }

    /// Remove a watched movie after the user confirms. Returns whether
    /// anything was removed.
    pub fn delete_watched(&mut self, imdb_id: &str, prompt: &dyn ConfirmPrompt) -> Result<bool, AppError> {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            debug!("Deletion of {} declined", imdb_id);
            return Ok(false);
        }
        let removed = self.watched.retain(|m| m.imdb_id != imdb_id)?;
        if removed > 0 {
            info!("Removed {} from watched list", imdb_id);
        }
        Ok(removed > 0)
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Global keyboard shortcuts. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Escape if self.selected.is_some() => {
                self.close_movie();
                true
            }
            // Enter only jumps to search when nobody is typing
            Key::Enter if self.focus == Focus::None => {
                self.focus = Focus::SearchField;
                self.set_query("");
                true
            }
            _ => false,
        }
    }

    pub fn toggle_panel(&mut self, panel: Panel) -> bool {
        let open = match panel {
            Panel::Results => &mut self.results_open,
            Panel::Watched => &mut self.watched_open,
        };
        *open = !*open;
        *open
    }

    pub fn is_panel_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Results => self.results_open,
            Panel::Watched => self.watched_open,
        }
    }

    pub fn results_view(&self) -> ResultsView {
        if !self.results_open {
            return ResultsView::Collapsed;
        }
        let state = self.search.state();
        if state.loading {
            ResultsView::Loading
        } else if let Some(error) = state.error {
            ResultsView::Error(error)
        } else if self.query.is_empty() {
            ResultsView::Prompt
        } else if state.movies.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Movies(state.movies)
        }
    }

    pub fn detail_view(&self) -> DetailView {
        if !self.watched_open {
            return DetailView::Collapsed;
        }
        let Some(selected) = self.selected.as_deref() else {
            return DetailView::Summary {
                summary: self.summary(),
                watched: self.watched.items().to_vec(),
            };
        };

        let state = self.detail.state();
        if state.loading {
            return DetailView::Loading;
        }
        if let Some(error) = state.error {
            return DetailView::Failed(error);
        }
        match state.movie {
            Some(movie) => {
                let rating = match self.watched_rating(selected) {
                    Some(rated) => RatingView::AlreadyRated(rated),
                    None => RatingView::Pending {
                        chosen: self.rating.rating(),
                        can_add: self.rating.is_rated(),
                    },
                };
                DetailView::Movie { movie, rating }
            }
            None => DetailView::Loading,
        }
    }

    fn reset_rating(&mut self) {
        self.rating = new_rating_widget(&self.options);
        self.count_rating_decisions = 0;
    }
}

fn new_rating_widget(options: &AppOptions) -> StarRating {
    StarRating::new(options.max_rating).with_size(options.star_size)
}
