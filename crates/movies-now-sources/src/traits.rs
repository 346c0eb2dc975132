use async_trait::async_trait;
use movies_now_models::{MovieDetail, SearchResult};

use crate::error::SourceError;

/// An upstream movie database.
///
/// Implementations must be cheap to call concurrently: the search and detail
/// data sources each run their requests on spawned tasks and may abandon a
/// call at any await point.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Free-text title search. An empty match is reported as `SourceError::NotFound`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    /// Full record for a single movie id.
    async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
