use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_core::DELETE_CONFIRMATION;
use movies_now_models::{WatchSummary, WatchedMovie};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing::info;

use super::{prompts, ui, Session};
use crate::output::Output;
use crate::WatchedCommands;

pub async fn run_watched(cmd: WatchedCommands, output: &Output) -> Result<()> {
    let session = Session::load()?;

    match cmd {
        WatchedCommands::List => {
            let watched = session.watched_list()?;
            output.json(&json!({ "watched": watched.items() }));
            if watched.is_empty() {
                output.info("Your watched list is empty");
            } else {
                output.table(&ui::watched_table(watched.items()));
            }
            Ok(())
        }
        WatchedCommands::Summary => {
            let watched = session.watched_list()?;
            let summary = WatchSummary::from_watched(watched.items());
            output.json(&json!({ "summary": summary }));
            output.table(&ui::summary_table(&summary));
            Ok(())
        }
        WatchedCommands::Remove { imdb_id, yes } => {
            let mut watched = session.watched_list()?;
            let Some(movie) = watched.iter().find(|m| m.imdb_id == imdb_id).cloned() else {
                output.warn(format!("{} is not in your watched list", imdb_id));
                return Ok(());
            };

            if !yes {
                output.println(format!("{} ({})", movie.title, movie.year));
                if !prompts::confirm(DELETE_CONFIRMATION) {
                    output.info("Nothing removed");
                    return Ok(());
                }
            }

            watched
                .retain(|m| m.imdb_id != imdb_id)
                .map_err(|e| eyre!("Failed to save watched list: {}", e))?;
            output.json(&json!({ "removed": movie.imdb_id }));
            output.success(format!("Removed {} from your watched list", movie.title));
            Ok(())
        }
        WatchedCommands::Export { path } => {
            let watched = session.watched_list()?;
            export_csv(watched.items(), &path)?;
            info!("Exported {} watched movies to {}", watched.len(), path.display());
            output.json(&json!({ "exported": watched.len(), "path": path }));
            output.success(format!("Exported {} movies to {}", watched.len(), path.display()));
            Ok(())
        }
    }
}

/// One CSV line. Every column is always present, unlike the JSON form which
/// omits unset optional fields.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "imdbID")]
    imdb_id: &'a str,
    title: &'a str,
    year: &'a str,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<f32>,
    #[serde(rename = "userRating")]
    user_rating: u8,
    runtime: Option<u32>,
    #[serde(rename = "countRatingDecisions")]
    count_rating_decisions: u32,
    #[serde(rename = "addedAt")]
    added_at: String,
}

impl<'a> From<&'a WatchedMovie> for ExportRow<'a> {
    fn from(movie: &'a WatchedMovie) -> Self {
        Self {
            imdb_id: &movie.imdb_id,
            title: &movie.title,
            year: &movie.year,
            imdb_rating: movie.imdb_rating,
            user_rating: movie.user_rating,
            runtime: movie.runtime,
            count_rating_decisions: movie.count_rating_decisions,
            added_at: movie.added_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        }
    }
}

fn export_csv(watched: &[WatchedMovie], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| eyre!("Failed to create {}: {}", path.display(), e))?;
    for movie in watched {
        writer
            .serialize(ExportRow::from(movie))
            .map_err(|e| eyre!("Failed to write {}: {}", movie.imdb_id, e))?;
    }
    writer.flush()?;
    Ok(())
}
