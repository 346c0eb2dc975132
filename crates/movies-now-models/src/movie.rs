use serde::{Deserialize, Serialize};

/// Full record for a single movie, fetched when it is selected.
///
/// Upstream placeholders (`"N/A"`) are normalized to `None` before a
/// `MovieDetail` is built, so every `Some` here carries real data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f32>, // 0.0 - 10.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
}

impl MovieDetail {
    /// Title suitable for the document title; `None` while the record is empty.
    pub fn display_title(&self) -> Option<&str> {
        let title = self.title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}
