use thiserror::Error;

pub use reqwest::StatusCode;

/// Failures surfaced by a movie source.
///
/// The `Display` text is what the user sees, so the messages stay short.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Upstream answered with a non-success HTTP status
    #[error("Something went wrong while fetching movies")]
    Status(StatusCode),

    /// Upstream signalled that the search matched nothing
    #[error("No Movie Found")]
    NotFound,

    /// Upstream signalled failure with its own message (e.g. an unknown id)
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("OMDb API key is not configured")]
    MissingApiKey,
}
