//! Types d'erreurs pour boomstore

/// Erreurs du magasin de bibliothèque
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Media file not found: {0}")]
    MediaNotFound(i64),

    #[error("Channel not found: {0}")]
    ChannelNotFound(i64),

    #[error("Library path not found: {0}")]
    LibraryPathNotFound(i64),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Store(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Store(format!("JSON column error: {}", e))
    }
}

/// Type Result spécialisé pour boomstore
pub type Result<T> = std::result::Result<T, Error>;
