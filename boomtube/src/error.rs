//! Types d'erreurs pour boomtube

/// Erreurs de l'importateur YouTube
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Playlist import requires a YouTube API key")]
    MissingApiKey,

    #[error("No metadata found for '{0}'")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(#[from] boomstore::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour boomtube
pub type Result<T> = std::result::Result<T, Error>;
