pub mod clear;
pub mod config;
pub mod interactive;
pub mod prompts;
pub mod rate;
pub mod search;
pub mod show;
pub mod ui;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use movies_now_config::{Config, CredentialStore, PathManager};
use movies_now_core::{App, AppOptions, DocumentTitle, ListStore, PersistentList, SearchOptions};
use movies_now_models::WatchedMovie;
use std::sync::Arc;
use tracing::debug;

/// Paths, settings and credentials shared by every command.
pub struct Session {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl Session {
    pub fn load() -> Result<Self> {
        Self::open(true)
    }

    /// Load without validating the settings, so `config set` can repair them.
    pub fn load_for_editing() -> Result<Self> {
        Self::open(false)
    }

    fn open(validate: bool) -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create data directories: {}", e))?;

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        if validate {
            config
                .validate()
                .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
        }

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        debug!("Session loaded from {}", paths.config_dir().display());
        Ok(Self {
            paths,
            config,
            credentials,
        })
    }

    pub fn store(&self) -> Result<ListStore> {
        ListStore::new(self.paths.store_dir()).map_err(|e| eyre!("Failed to open store: {}", e))
    }

    pub fn watched_list(&self) -> Result<PersistentList<WatchedMovie>> {
        Ok(PersistentList::open(self.store()?, self.config.storage.watched_key.clone()))
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            search: SearchOptions::from(&self.config.search),
            watched_key: self.config.storage.watched_key.clone(),
            max_rating: self.config.rating.max_rating,
            star_size: self.config.rating.size,
        }
    }

    /// Build the application state backed by the configured movie source.
    pub fn open_app(&self, title: Arc<dyn DocumentTitle>) -> Result<App> {
        let source = movies_now_sources::create_source(&self.config, &self.credentials)
            .map_err(|e| eyre!("{}", e))?;
        Ok(App::new(source, self.store()?, title, self.app_options()))
    }
}
