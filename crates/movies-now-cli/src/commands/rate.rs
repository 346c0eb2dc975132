use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_core::{AppError, DetailView, MemoryTitle};
use serde_json::json;
use std::sync::Arc;

use super::{ui, Session};
use crate::output::Output;

pub async fn run_rate(imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let session = Session::load()?;
    let mut app = session.open_app(Arc::new(MemoryTitle::new()))?;

    app.select_movie(imdb_id);
    ui::with_spinner("Loading movie...", app.detail_settled()).await;

    if let DetailView::Failed(message) = app.detail_view() {
        return Err(eyre!("Could not load {}: {}", imdb_id, message));
    }

    app.set_user_rating(rating).map_err(|e| eyre!("{}", e))?;

    match app.add_watched() {
        Ok(movie) => {
            output.json(&json!({ "added": movie }));
            output.success(format!("Added {} to your watched list ({} ⭐)", movie.title, movie.user_rating));
            Ok(())
        }
        Err(AppError::AlreadyWatched(id)) => {
            let existing = app.watched_rating(&id).unwrap_or_default();
            output.warn(format!("You already rated this movie {} ⭐", existing));
            Ok(())
        }
        Err(e) => Err(eyre!("{}", e)),
    }
}
