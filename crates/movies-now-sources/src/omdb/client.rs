use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use async_trait::async_trait;
use movies_now_models::{MovieDetail, SearchResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub fn create_omdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("movies-now/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }

        Ok(Self {
            client: Arc::new(create_omdb_client(timeout)),
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        debug!("Searching OMDb for '{}'", query);
        let results = api::search(&self.client, &self.base_url, &self.api_key, query).await?;
        info!("OMDb search for '{}' returned {} results", query, results.len());
        Ok(results)
    }

    async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        debug!("Fetching OMDb detail for {}", imdb_id);
        api::movie_detail(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_key() {
        let result = OmdbClient::new("  ".to_string(), "https://www.omdbapi.com/".to_string(), Duration::from_secs(5));
        assert!(matches!(result, Err(SourceError::MissingApiKey)));
    }

    #[test]
    fn test_new_keeps_base_url() {
        let client = OmdbClient::new("key".to_string(), "http://localhost:9999/".to_string(), Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/");
        assert_eq!(client.source_name(), "omdb");
    }
}
