use movies_now_models::{MovieDetail, SearchResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;

#[cfg(test)]
mod tests;

/// OMDb encodes its success flag as the strings "True"/"False", but some
/// mirrors send a JSON boolean instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseFlag {
    Bool(bool),
    Text(String),
}

impl ResponseFlag {
    fn is_success(&self) -> bool {
        match self {
            ResponseFlag::Bool(b) => *b,
            ResponseFlag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchEnvelope {
    #[serde(rename = "Response")]
    response: Option<ResponseFlag>,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Response")]
    response: Option<ResponseFlag>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
}

/// Drop OMDb's "N/A" placeholder and blank strings.
fn available(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "N/A")
}

/// "142 min" -> 142
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

/// "8.0" -> 8.0, rejecting anything outside the 0-10 scale
pub fn parse_imdb_rating(rating: &str) -> Option<f32> {
    rating
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|r| (0.0..=10.0).contains(r))
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, SourceError> {
    let envelope: OmdbSearchEnvelope = serde_json::from_str(body)?;

    let success = envelope.response.as_ref().map(ResponseFlag::is_success).unwrap_or(false);
    if !success {
        debug!("OMDb search returned no results: {:?}", envelope.error);
        return Err(SourceError::NotFound);
    }

    Ok(envelope
        .search
        .into_iter()
        .map(|item| SearchResult {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: available(item.poster),
        })
        .collect())
}

pub fn parse_detail_response(body: &str, requested_id: &str) -> Result<MovieDetail, SourceError> {
    let movie: OmdbMovie = serde_json::from_str(body)?;

    let success = movie.response.as_ref().map(ResponseFlag::is_success).unwrap_or(false);
    if !success {
        let message = movie.error.unwrap_or_else(|| format!("No details found for {}", requested_id));
        return Err(SourceError::Upstream(message));
    }

    let runtime_minutes = available(movie.runtime).and_then(|r| parse_runtime_minutes(&r));
    let imdb_rating = available(movie.imdb_rating).and_then(|r| {
        let parsed = parse_imdb_rating(&r);
        if parsed.is_none() {
            warn!("Ignoring unparseable imdbRating '{}' for {}", r, requested_id);
        }
        parsed
    });

    Ok(MovieDetail {
        imdb_id: movie.imdb_id.unwrap_or_else(|| requested_id.to_string()),
        title: movie.title,
        year: movie.year,
        poster: available(movie.poster),
        runtime_minutes,
        imdb_rating,
        plot: available(movie.plot),
        released: available(movie.released),
        director: available(movie.director),
        genre: available(movie.genre),
        actors: available(movie.actors),
    })
}

/// Search OMDb by title (`?apikey=..&s=..`)
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("s", query)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        warn!("OMDb search for '{}' failed with status {}", query, status);
        return Err(SourceError::Status(status));
    }

    let body = response.text().await?;
    parse_search_response(&body)
}

/// Fetch a single movie by IMDb id (`?apikey=..&i=..`)
pub async fn movie_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, SourceError> {
    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("i", imdb_id)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        warn!("OMDb detail for '{}' failed with status {}", imdb_id, status);
        return Err(SourceError::Status(status));
    }

    let body = response.text().await?;
    parse_detail_response(&body, imdb_id)
}
