use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieDetail;

/// A movie the user rated and saved to the watch list.
///
/// Field names on disk match the watch-list format written by earlier
/// versions of the app, so existing lists keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f32>,
    #[serde(default)]
    pub runtime: Option<u32>, // minutes
    #[serde(rename = "userRating")]
    pub user_rating: u8, // 1-10 integer
    #[serde(rename = "countRatingDecisions", default)]
    pub count_rating_decisions: u32,
    #[serde(rename = "addedAt", default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchedMovie {
    /// Compose a watch-list entry from the selected movie and the user's rating.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, count_rating_decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.imdb_rating,
            runtime: detail.runtime_minutes,
            user_rating,
            count_rating_decisions,
            added_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_legacy_entry() {
        // Entries written before `addedAt` existed
        let json = r#"{
            "imdbID": "tt0848228",
            "title": "The Avengers",
            "year": "2012",
            "poster": "https://example.com/p.jpg",
            "imdbRating": 8.0,
            "runtime": 143,
            "userRating": 9,
            "countRatingDecisions": 2
        }"#;
        let movie: WatchedMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.imdb_id, "tt0848228");
        assert_eq!(movie.user_rating, 9);
        assert_eq!(movie.runtime, Some(143));
        assert_eq!(movie.count_rating_decisions, 2);
        assert!(movie.added_at.is_none());
    }

    #[test]
    fn test_from_detail_copies_fields() {
        let detail = MovieDetail {
            imdb_id: "tt1".to_string(),
            title: "Avengers".to_string(),
            year: "2012".to_string(),
            runtime_minutes: Some(143),
            imdb_rating: Some(8.0),
            ..MovieDetail::default()
        };

        let watched = WatchedMovie::from_detail(&detail, 8, 1);
        assert_eq!(watched.imdb_id, "tt1");
        assert_eq!(watched.title, "Avengers");
        assert_eq!(watched.user_rating, 8);
        assert_eq!(watched.runtime, Some(143));
        assert_eq!(watched.imdb_rating, Some(8.0));
        assert!(watched.added_at.is_some());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let watched = WatchedMovie {
            imdb_id: "tt1".to_string(),
            title: "Avengers".to_string(),
            year: "2012".to_string(),
            poster: None,
            imdb_rating: None,
            runtime: None,
            user_rating: 8,
            count_rating_decisions: 0,
            added_at: None,
        };
        let value = serde_json::to_value(&watched).unwrap();
        assert_eq!(value["imdbID"], "tt1");
        assert_eq!(value["userRating"], 8);
        assert!(value.get("poster").is_none());
        assert!(value.get("addedAt").is_none());
    }
}
