//! Contrat des sources d'éléments paginées

use crate::types::AssetPage;
use anyhow::Result;
use async_trait::async_trait;

/// Limite maximale acceptée pour la taille d'une page.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Paramètres de pagination invalides, rejetés avant toute E/S.
///
/// C'est la seule erreur remontée telle quelle au code appelant le point
/// d'entrée de pagination ; tout le reste est transformé en état.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("page limit {limit} is outside 1..={max_limit}")]
pub struct InvalidPageRequest {
    pub limit: usize,
    pub max_limit: usize,
}

/// Valide les paramètres d'une requête de page.
///
/// L'offset est non signé, donc toujours ≥ 0 ; seule la limite est
/// contrainte à `1..=MAX_PAGE_LIMIT`.
///
/// # Arguments
///
/// * `limit` - Nombre d'éléments demandés
pub fn validate_page_request(limit: usize) -> Result<(), InvalidPageRequest> {
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(InvalidPageRequest {
            limit,
            max_limit: MAX_PAGE_LIMIT,
        });
    }
    Ok(())
}

/// Fournisseur paginé d'identifiants et de métadonnées d'éléments
///
/// La source doit présenter un ordre stable (clé de tri déterministe, par
/// exemple la date de création décroissante) entre deux appels d'une même
/// génération, afin que la pagination ne saute ni ne duplique d'éléments.
///
/// Un `offset` au-delà de la fin de la collection retourne une page vide,
/// pas une erreur.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Récupère une page d'éléments.
    ///
    /// # Arguments
    ///
    /// * `offset` - Index global du premier élément demandé
    /// * `limit` - Nombre d'éléments demandés (1..=1000)
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<AssetPage>;

    /// Nombre total d'éléments actuellement exposés par la source.
    async fn total_count(&self) -> Result<usize>;
}
