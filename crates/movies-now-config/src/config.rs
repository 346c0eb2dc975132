use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub rating: RatingConfig,
}

/// Upstream provider settings. The API key itself lives in the credential store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// Queries shorter than this never reach the network
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
    #[serde(default)]
    pub debounce_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_watched_key")]
    pub watched_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RatingConfig {
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
    #[serde(default = "default_star_size")]
    pub size: u16,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_min_query_length() -> usize {
    3
}

fn default_watched_key() -> String {
    "watched".to_string()
}

fn default_max_rating() -> u8 {
    10
}

fn default_star_size() -> u16 {
    24
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            debounce_ms: 0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watched_key: default_watched_key(),
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_rating: default_max_rating(),
            size: default_star_size(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.omdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", self.omdb.base_url));
        }
        if self.omdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_seconds must be greater than zero"));
        }
        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }
        if self.storage.watched_key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.watched_key cannot be empty"));
        }
        if self.storage.watched_key.contains(['/', '\\']) {
            return Err(anyhow::anyhow!("storage.watched_key cannot contain path separators"));
        }
        if self.rating.max_rating == 0 {
            return Err(anyhow::anyhow!("rating.max_rating must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.search.debounce_ms = 250;
        config.storage.watched_key = "my-list".to_string();

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.search.debounce_ms, 250);
        assert_eq!(loaded.search.min_query_length, 3);
        assert_eq!(loaded.storage.watched_key, "my-list");
        assert_eq!(loaded.omdb.base_url, DEFAULT_OMDB_BASE_URL);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[search]\ndebounce_ms = 100\n").unwrap();
        assert_eq!(config.search.debounce_ms, 100);
        assert_eq!(config.search.min_query_length, 3);
        assert_eq!(config.rating.max_rating, 10);
        assert_eq!(config.rating.size, 24);
        assert_eq!(config.storage.watched_key, "watched");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.omdb.timeout_seconds, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.omdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.omdb.base_url = DEFAULT_OMDB_BASE_URL.to_string();

        config.storage.watched_key = "../escape".to_string();
        assert!(config.validate().is_err());
        config.storage.watched_key = "watched".to_string();

        config.rating.max_rating = 0;
        assert!(config.validate().is_err());
    }
}
