//! Types d'erreurs pour pglwindow

/// Erreurs de la fenêtre paginée
///
/// Les échecs de fetch de page ne figurent pas ici : ils sont capturés à la
/// frontière de la fenêtre et transformés en état (`FetchState::Error`),
/// jamais remontés au consommateur.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid page request: {0}")]
    InvalidParameters(#[from] pglsource::InvalidPageRequest),

    #[error("invalid window configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour pglwindow
pub type Result<T> = std::result::Result<T, Error>;
