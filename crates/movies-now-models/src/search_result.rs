use serde::{Deserialize, Serialize};

/// One row of an upstream search response. Discarded on the next search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}
