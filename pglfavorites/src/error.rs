//! Types d'erreurs pour pglfavorites

/// Erreurs du registre des favoris
///
/// Seul le chargement initial peut échouer vers l'appelant ; les écritures
/// différées sont journalisées et ré-essayées à la mutation suivante.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour pglfavorites
pub type Result<T> = std::result::Result<T, Error>;
