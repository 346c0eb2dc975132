pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, OmdbConfig, RatingConfig, SearchConfig, StorageConfig, DEFAULT_OMDB_BASE_URL};
pub use credentials::{CredentialStore, OMDB_API_KEY_ENV};
pub use paths::{PathManager, base_path_override};
