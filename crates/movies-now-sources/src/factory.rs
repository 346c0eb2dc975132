use anyhow::Result;
use movies_now_config::{Config, CredentialStore};
use std::sync::Arc;
use std::time::Duration;

use crate::omdb::OmdbClient;
use crate::traits::MovieSource;

/// Build the configured movie source.
///
/// Fails when no API key is available from the environment or the
/// credential store.
pub fn create_source(config: &Config, credentials: &CredentialStore) -> Result<Arc<dyn MovieSource>> {
    let api_key = credentials.resolve_omdb_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "OMDb API key is not configured. Run 'moviesnow config api-key' or set {}",
            movies_now_config::OMDB_API_KEY_ENV
        )
    })?;

    let client = OmdbClient::new(
        api_key,
        config.omdb.base_url.clone(),
        Duration::from_secs(config.omdb.timeout_seconds),
    )?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source_with_stored_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut credentials = CredentialStore::new(dir.path().join("credentials.toml"));
        credentials.set_omdb_api_key("stored-key".to_string());

        let source = create_source(&Config::default(), &credentials).unwrap();
        assert_eq!(source.source_name(), "omdb");
    }
}
