//! GalleryController : assemblage des composants et surface de requête

use bytes::Bytes;
use pglcache::{ContentCache, PartitionConfig};
use pglfavorites::FavoriteRegistry;
use pglloader::ImageLoadCoordinator;
use pglsource::{
    AccessGate, AccessStatus, AssetSource, ImageFetcher, LoadState, Variant,
};
use pglwindow::{FetchState, PagedAssetWindow, WindowConfig, WindowEvent, WindowSnapshot};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Marge d'entrées de cache au-delà de la capacité de la fenêtre
///
/// Les vignettes des éléments fraîchement évincés restent ainsi disponibles
/// si l'utilisateur remonte d'une page.
const THUMBNAIL_CACHE_HEADROOM: usize = 50;

/// Configuration du contrôleur de galerie
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub window: WindowConfig,
    /// Nombre de vignettes préchargées par page fraîche
    pub preload_count: usize,
    /// Dimensions cibles des vignettes de la grille
    pub thumbnail_size: (u32, u32),
    /// Limite de la partition vignettes ; par défaut, capacité de la fenêtre
    /// plus une marge
    pub thumbnail_capacity: Option<usize>,
    /// Limite de la partition images complètes ; par défaut, celle de la
    /// partition
    pub fullsize_capacity: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            preload_count: pglloader::DEFAULT_PRELOAD_COUNT,
            thumbnail_size: (200, 200),
            thumbnail_capacity: None,
            fullsize_capacity: None,
        }
    }
}

/// Contrôleur de la galerie : câblage et surface de requête
///
/// Chaque composant est construit explicitement et partagé par `Arc` ; aucun
/// registre global. La couche de rendu consomme les snapshots et le canal
/// d'évènements, et pilote la pagination et les chargements à la demande.
pub struct GalleryController {
    source: Arc<dyn AssetSource>,
    gate: Option<Arc<dyn AccessGate>>,
    cache: Arc<ContentCache>,
    window: Arc<PagedAssetWindow>,
    coordinator: Arc<ImageLoadCoordinator>,
    favorites: Arc<FavoriteRegistry>,
    thumbnail_size: (u32, u32),
}

impl GalleryController {
    /// Assemble un contrôleur complet.
    ///
    /// # Arguments
    ///
    /// * `source` - Fournisseur paginé d'éléments
    /// * `fetcher` - Collaborateur de récupération d'images
    /// * `gate` - Garde d'accès optionnelle ; tant qu'elle ne répond pas
    ///   `Granted`, aucune page n'est demandée
    /// * `favorites` - Registre des favoris
    /// * `config` - Paramètres de fenêtre, cache et préchargement
    pub fn new(
        source: Arc<dyn AssetSource>,
        fetcher: Arc<dyn ImageFetcher>,
        gate: Option<Arc<dyn AccessGate>>,
        favorites: Arc<FavoriteRegistry>,
        config: GalleryConfig,
    ) -> pglwindow::Result<Self> {
        let thumbnail_capacity = config
            .thumbnail_capacity
            .unwrap_or(config.window.max_window_size + THUMBNAIL_CACHE_HEADROOM);
        let fullsize_capacity = config
            .fullsize_capacity
            .unwrap_or_else(pglcache::FullsizePartition::default_capacity);
        let cache = Arc::new(ContentCache::with_limits(
            thumbnail_capacity,
            fullsize_capacity,
        ));

        let window = Arc::new(match &gate {
            Some(gate) => PagedAssetWindow::with_gate(
                Arc::clone(&source),
                Arc::clone(gate),
                config.window.clone(),
            )?,
            None => PagedAssetWindow::new(Arc::clone(&source), config.window.clone())?,
        });

        let coordinator = Arc::new(ImageLoadCoordinator::with_preload_count(
            Arc::clone(&cache),
            Arc::clone(&window),
            fetcher,
            config.preload_count,
        ));

        tracing::info!(
            page_size = config.window.page_size,
            window_capacity = config.window.max_window_size,
            thumbnail_capacity,
            fullsize_capacity,
            "Gallery controller ready"
        );

        Ok(Self {
            source,
            gate,
            cache,
            window,
            coordinator,
            favorites,
            thumbnail_size: config.thumbnail_size,
        })
    }

    /// Assemble un contrôleur depuis une configuration pglconfig.
    ///
    /// Les limites de cache, la fenêtre et le préchargement viennent de la
    /// configuration ; les favoris sont persistés dans le fichier qu'elle
    /// désigne.
    #[cfg(feature = "pglconfig")]
    pub async fn new_configured(
        config: &pglconfig::Config,
        source: Arc<dyn AssetSource>,
        fetcher: Arc<dyn ImageFetcher>,
        gate: Option<Arc<dyn AccessGate>>,
    ) -> anyhow::Result<Self> {
        use pglcache::ContentCacheConfigExt;
        use pglfavorites::{FavoritesConfigExt, JsonFileStore};
        use pglloader::LoaderConfigExt;
        use pglwindow::WindowConfigExt;

        let store = Arc::new(JsonFileStore::new(config.get_favorites_file()?));
        let favorites = Arc::new(FavoriteRegistry::with_store(store).await?);

        let gallery_config = GalleryConfig {
            window: config.window_config()?,
            preload_count: config.get_preload_count()?,
            thumbnail_capacity: Some(config.get_thumbnail_cache_size()?),
            fullsize_capacity: Some(config.get_fullsize_cache_size()?),
            ..GalleryConfig::default()
        };

        let controller = Self::new(source, fetcher, gate, favorites, gallery_config)?;
        controller
            .cache
            .set_cost_limit(Variant::Fullsize, config.get_fullsize_cost_limit()?);
        Ok(controller)
    }

    // ------------------------------------------------------------------
    // Garde d'accès
    // ------------------------------------------------------------------

    /// État courant de l'autorisation d'accès.
    pub fn access_status(&self) -> AccessStatus {
        match &self.gate {
            Some(gate) => gate.status(),
            None => AccessStatus::Granted,
        }
    }

    /// Demande l'accès si nécessaire et retourne l'état résultant.
    pub async fn request_access(&self) -> AccessStatus {
        match &self.gate {
            Some(gate) => gate.request_access().await,
            None => AccessStatus::Granted,
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Demande la page suivante et précharge les vignettes ajoutées.
    ///
    /// # Returns
    ///
    /// `Ok(true)` si une page a été appliquée.
    pub async fn load_more(&self) -> pglwindow::Result<bool> {
        let reached_before = {
            let snapshot = self.window.snapshot();
            snapshot.base_global_offset + snapshot.items.len()
        };

        let applied = self.window.request_more().await?;
        if applied {
            self.preload_fresh_records(reached_before);
        }
        Ok(applied)
    }

    /// Ré-essaie après un échec de page, sans attendre le debounce.
    pub async fn retry(&self) -> pglwindow::Result<bool> {
        let reached_before = {
            let snapshot = self.window.snapshot();
            snapshot.base_global_offset + snapshot.items.len()
        };

        let applied = self.window.retry().await?;
        if applied {
            self.preload_fresh_records(reached_before);
        }
        Ok(applied)
    }

    /// Précharge les vignettes des éléments situés au-delà de l'ancien
    /// horizon de la fenêtre.
    fn preload_fresh_records(&self, reached_before: usize) {
        let snapshot = self.window.snapshot();
        let reached = snapshot.base_global_offset + snapshot.items.len();
        let appended = reached.saturating_sub(reached_before);
        if appended == 0 {
            return;
        }

        let start = snapshot.items.len() - appended;
        let fresh = snapshot.items[start..].to_vec();
        Arc::clone(&self.coordinator).preload(fresh, Some(self.thumbnail_size));
    }

    /// Vide la fenêtre et repart de l'offset 0.
    ///
    /// Les caches survivent : un identifiant qui réapparaît après le reset
    /// est servi sans nouveau fetch d'image.
    pub fn reset(&self) {
        self.window.reset();
    }

    // ------------------------------------------------------------------
    // Surface de requête
    // ------------------------------------------------------------------

    /// Snapshot en lecture seule de la fenêtre.
    pub fn snapshot(&self) -> WindowSnapshot {
        self.window.snapshot()
    }

    /// S'abonne aux évènements de la fenêtre.
    pub fn subscribe(&self) -> broadcast::Receiver<WindowEvent> {
        self.window.subscribe()
    }

    /// État de chargement d'un élément présent dans la fenêtre.
    pub fn load_state(&self, id: &str) -> Option<LoadState> {
        self.window.get(id).map(|record| record.load_state)
    }

    /// Reste-t-il des pages à charger ?
    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    /// Message du dernier échec de page, le cas échéant.
    pub fn last_error(&self) -> Option<String> {
        self.window.last_error()
    }

    /// Nombre total d'éléments exposés par la source, interrogé en direct.
    pub async fn total_photo_count(&self) -> pglwindow::Result<usize> {
        Ok(self.source.total_count().await?)
    }

    /// Ligne de statut destinée à l'affichage.
    pub fn loading_status(&self) -> String {
        if self.access_status() == AccessStatus::Denied {
            return "Photo access is required".to_string();
        }
        match self.window.fetch_state() {
            FetchState::FetchingPage => "Loading photos...".to_string(),
            FetchState::Error(_) => "Failed to load photos".to_string(),
            FetchState::Idle => format!(
                "Loaded {} of {} photos",
                self.window.len(),
                self.window.total_count()
            ),
        }
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Vignette d'un élément, à la demande (cellule devenue visible).
    pub async fn thumbnail(&self, id: &str) -> Option<Bytes> {
        self.coordinator
            .ensure_loaded(id, Variant::Thumbnail, Some(self.thumbnail_size))
            .await
    }

    /// Image complète d'un élément (vue de détail).
    pub async fn full_image(&self, id: &str, target_size: Option<(u32, u32)>) -> Option<Bytes> {
        self.coordinator
            .ensure_loaded(id, Variant::Fullsize, target_size)
            .await
    }

    // ------------------------------------------------------------------
    // Favoris
    // ------------------------------------------------------------------

    /// L'élément est-il favori ?
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Bascule l'état favori ; la lecture reflète immédiatement la bascule.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        self.favorites.toggle(id)
    }

    /// Nombre de favoris.
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    // ------------------------------------------------------------------
    // Accès aux composants
    // ------------------------------------------------------------------

    pub fn window(&self) -> Arc<PagedAssetWindow> {
        Arc::clone(&self.window)
    }

    pub fn cache(&self) -> Arc<ContentCache> {
        Arc::clone(&self.cache)
    }

    pub fn favorites(&self) -> Arc<FavoriteRegistry> {
        Arc::clone(&self.favorites)
    }
}
