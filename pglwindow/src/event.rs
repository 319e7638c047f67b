//! Évènements émis par la fenêtre paginée

use pglsource::LoadState;

/// Évènement publié sur le canal broadcast de la fenêtre
///
/// Le consommateur (couche de rendu, hors périmètre) applique son diff après
/// chaque évènement au lieu de recevoir des callbacks depuis le modèle.
#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// Une page a été appliquée : `appended` éléments ajoutés en queue,
    /// `evicted` éléments retirés par l'avant.
    PageLoaded { appended: usize, evicted: usize },

    /// Le fetch de page a échoué ; les éléments existants sont conservés.
    PageFailed { message: String },

    /// La fenêtre a été vidée et sa génération incrémentée.
    Reset,

    /// L'état de chargement d'un élément encore présent a changé.
    LoadStateChanged { id: String, state: LoadState },
}
