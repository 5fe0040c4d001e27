//! Types d'erreurs pour boomcast

/// Erreurs du planificateur BomCast
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Scheduled item not found: {0}")]
    ItemNotFound(i64),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Store(e.to_string())
    }
}

/// Type Result spécialisé pour boomcast
pub type Result<T> = std::result::Result<T, Error>;
