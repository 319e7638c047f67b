//! Contrat du collaborateur de récupération d'images

use crate::types::Variant;
use async_trait::async_trait;
use bytes::Bytes;

/// Erreurs du collaborateur de récupération d'images
///
/// `NotFound` signale un élément absent de la bibliothèque ; `FetchFailed`
/// couvre les erreurs de décodage ou de transport. Dans les deux cas le
/// coordinateur marque l'élément `Failed` sans rien mettre en cache, si bien
/// qu'un nouvel essai reste toujours possible.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("asset not found")]
    NotFound,

    #[error("image fetch failed: {0}")]
    FetchFailed(String),
}

/// Récupère les octets d'une image pour un élément donné
///
/// Le transport sous-jacent (décodage local, serveur d'images, etc.) est hors
/// du périmètre du cœur ; seule cette interface compte.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Récupère le blob d'une image.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifiant de l'élément
    /// * `variant` - Classe de requête (vignette ou image complète)
    /// * `target_size` - Dimensions cibles `(largeur, hauteur)` si le
    ///   redimensionnement importe
    async fn fetch(
        &self,
        id: &str,
        variant: Variant,
        target_size: Option<(u32, u32)>,
    ) -> Result<Bytes, FetchError>;
}
