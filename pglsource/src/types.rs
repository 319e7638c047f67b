//! Types de base partagés par l'écosystème PGLPhoto

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classe de requête d'image : vignette ou image complète.
///
/// Chaque variante correspond à une partition indépendante du cache de
/// contenus, avec ses propres limites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Vignette (grille de la galerie)
    Thumbnail,
    /// Image complète (vue de détail)
    Fullsize,
}

impl Variant {
    /// Nom stable de la variante, utilisé dans les clés de cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Thumbnail => "thumbnail",
            Variant::Fullsize => "fullsize",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Métadonnées d'un élément de la photothèque
///
/// Récupérées une seule fois lors du fetch de la page, immuables ensuite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// État de chargement de l'image d'un élément
///
/// Mutée exclusivement par le coordinateur de chargement, via la fenêtre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Aucun chargement demandé pour l'instant
    Pending,
    /// Un fetch est en cours
    Loading,
    /// Le blob est disponible dans le cache
    Loaded,
    /// Le dernier fetch a échoué (ré-essayable)
    Failed,
}

/// Élément tel que retourné par une source paginée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Identifiant opaque, stable et globalement unique
    pub id: String,
    pub metadata: AssetMetadata,
}

/// Une page d'éléments retournée par `AssetSource::fetch_page`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    /// Éléments de la page, dans l'ordre stable de la source
    pub entries: Vec<AssetEntry>,
    /// Nombre total d'éléments de la collection au moment du fetch
    pub total_count: usize,
}

impl AssetPage {
    /// Page vide (offset au-delà de la fin de la collection)
    pub fn empty(total_count: usize) -> Self {
        Self {
            entries: Vec::new(),
            total_count,
        }
    }
}

/// Élément de la photothèque tel que connu de la fenêtre glissante
///
/// Créé lors du fetch d'une page, détruit lors de l'éviction par l'avant de
/// la fenêtre. La fenêtre en est l'unique propriétaire ; les consommateurs
/// reçoivent des clones via les snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    /// Identifiant opaque, clé de cache et d'éviction
    pub id: String,
    /// Position dans la collection complète au moment du fetch
    pub global_index: usize,
    pub metadata: AssetMetadata,
    pub load_state: LoadState,
}

impl AssetRecord {
    /// Construit un record frais (état `Pending`) à partir d'une entrée de page.
    pub fn new(entry: AssetEntry, global_index: usize) -> Self {
        Self {
            id: entry.id,
            global_index,
            metadata: entry.metadata,
            load_state: LoadState::Pending,
        }
    }
}
