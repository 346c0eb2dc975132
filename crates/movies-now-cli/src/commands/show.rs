use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_core::{DetailView, MemoryTitle, RatingView};
use serde_json::json;
use std::sync::Arc;

use super::{ui, Session};
use crate::output::Output;

pub async fn run_show(imdb_id: &str, output: &Output) -> Result<()> {
    let session = Session::load()?;
    let mut app = session.open_app(Arc::new(MemoryTitle::new()))?;

    app.select_movie(imdb_id);
    ui::with_spinner("Loading movie...", app.detail_settled()).await;

    report_detail(app.detail_view(), imdb_id, session.config.rating.max_rating, output)
}

fn report_detail(view: DetailView, imdb_id: &str, max_rating: u8, output: &Output) -> Result<()> {
    match view {
        DetailView::Movie { movie, rating } => {
            let user_rating = match rating {
                RatingView::AlreadyRated(value) => Some(value),
                RatingView::Pending { .. } => None,
            };
            output.json(&json!({ "movie": movie, "userRating": user_rating }));
            output.table(&ui::detail_table(&movie));
            match user_rating {
                Some(value) => output.info(format!("You rated this movie {} ⭐", value)),
                None => output.info(format!("Rate it with: moviesnow rate {} <1-{}>", imdb_id, max_rating)),
            }
            Ok(())
        }
        DetailView::Failed(message) => Err(eyre!("Could not load {}: {}", imdb_id, message)),
        _ => Err(eyre!("Could not load {}", imdb_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use movies_now_models::MovieDetail;

    fn quiet() -> Output {
        Output::new(OutputFormat::Human, true)
    }

    #[test]
    fn test_failed_lookup_fails_the_command() {
        let view = DetailView::Failed("Incorrect IMDb ID.".to_string());

        let err = report_detail(view, "tt0", 10, &quiet()).unwrap_err();

        assert_eq!(err.to_string(), "Could not load tt0: Incorrect IMDb ID.");
        assert!(report_detail(DetailView::Loading, "tt0", 10, &quiet()).is_err());
    }

    #[test]
    fn test_loaded_movie_succeeds() {
        let view = DetailView::Movie {
            movie: MovieDetail {
                imdb_id: "tt0848228".to_string(),
                title: "The Avengers".to_string(),
                ..MovieDetail::default()
            },
            rating: RatingView::AlreadyRated(9),
        };

        assert!(report_detail(view, "tt0848228", 10, &quiet()).is_ok());
    }
}
