//! Types d'erreurs pour boomscan

/// Erreurs du scanner de bibliothèque
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("External tool unavailable: {0}")]
    ProberMissing(String),

    #[error("Store error: {0}")]
    Store(#[from] boomstore::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour boomscan
pub type Result<T> = std::result::Result<T, Error>;
