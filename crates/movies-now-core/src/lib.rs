pub mod app;
pub mod detail;
pub mod rating;
pub mod search;
pub mod store;
pub mod title;

#[cfg(test)]
mod testing;

pub use app::{
    App, AppError, AppOptions, ConfirmPrompt, DetailView, Focus, Key, Panel, RatingView, ResultsView,
    DELETE_CONFIRMATION,
};
pub use detail::{DetailDataSource, DetailState};
pub use rating::{RatingError, StarRating};
pub use search::{SearchDataSource, SearchOptions, SearchPhase, SearchState};
pub use store::{ListStore, PersistentList};
pub use title::{DocumentTitle, MemoryTitle, TitleGuard, DEFAULT_TITLE};
