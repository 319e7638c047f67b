//! ImageLoadCoordinator : requêtes d'images dédupliquées pour la fenêtre

use crate::task::LoadTask;
use bytes::Bytes;
use pglcache::{cache_key, ContentCache};
use pglsource::{AssetRecord, ImageFetcher, LoadState, Variant};
use pglwindow::PagedAssetWindow;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Nombre d'éléments préchargés par page fraîche
pub const DEFAULT_PRELOAD_COUNT: usize = 10;

/// Coordinateur des requêtes de décodage/fetch d'images
///
/// Tient la map des requêtes en vol (clé de cache → tâche) pour dédupliquer
/// les demandes concurrentes, consulte et alimente le cache de contenus, et
/// fait transiter l'état de chargement des éléments via la fenêtre.
///
/// Note : ce type est conçu pour être utilisé derrière un
/// `Arc<ImageLoadCoordinator>` ; le préchargement détache des tâches qui en
/// clonent la référence.
pub struct ImageLoadCoordinator {
    cache: Arc<ContentCache>,
    window: Arc<PagedAssetWindow>,
    fetcher: Arc<dyn ImageFetcher>,
    /// Map des requêtes en cours (clé de cache → tâche)
    inflight: RwLock<HashMap<String, Arc<LoadTask>>>,
    preload_count: usize,
}

impl ImageLoadCoordinator {
    /// Crée le coordinateur avec le préchargement par défaut.
    pub fn new(
        cache: Arc<ContentCache>,
        window: Arc<PagedAssetWindow>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self::with_preload_count(cache, window, fetcher, DEFAULT_PRELOAD_COUNT)
    }

    /// Crée le coordinateur avec un nombre de préchargements explicite.
    pub fn with_preload_count(
        cache: Arc<ContentCache>,
        window: Arc<PagedAssetWindow>,
        fetcher: Arc<dyn ImageFetcher>,
        preload_count: usize,
    ) -> Self {
        Self {
            cache,
            window,
            fetcher,
            inflight: RwLock::new(HashMap::new()),
            preload_count,
        }
    }

    /// Garantit que l'image d'un élément est chargée.
    ///
    /// # Workflow
    ///
    /// 1. Calcule la clé de cache `(id, variante, dimensions)`
    /// 2. Hit du cache : marque `Loaded` et retourne le blob, aucun fetch émis
    /// 3. Requête déjà en vol pour cette clé : s'attache à son dénouement
    /// 4. Sinon : marque `Loading`, appelle le collaborateur d'images ;
    ///    succès → `put` au cache puis `Loaded` ; échec → `Failed`, cache
    ///    intact
    ///
    /// Les échecs par élément ne remontent jamais en erreur : la méthode
    /// retourne `None` et l'état `Failed` reste ré-essayable.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifiant de l'élément
    /// * `variant` - Classe de requête (vignette ou image complète)
    /// * `target_size` - Dimensions cibles, si le redimensionnement importe
    pub async fn ensure_loaded(
        &self,
        id: &str,
        variant: Variant,
        target_size: Option<(u32, u32)>,
    ) -> Option<Bytes> {
        let key = cache_key(id, variant, target_size);

        if let Some(blob) = self.cache.get(variant, &key) {
            self.window.mark_load_state(id, LoadState::Loaded);
            return Some(blob);
        }

        // Déduplication : un seul appelant devient propriétaire de la requête
        let (task, owner) = {
            let mut inflight = self.inflight.write().await;
            match inflight.get(&key) {
                Some(existing) => (Arc::clone(existing), false),
                None => {
                    let task = Arc::new(LoadTask::new());
                    inflight.insert(key.clone(), Arc::clone(&task));
                    (task, true)
                }
            }
        };

        if !owner {
            tracing::debug!(asset = %id, %variant, "Attaching to in-flight image fetch");
            return task.wait().await.ok();
        }

        self.window.mark_load_state(id, LoadState::Loading);

        let outcome = match self.fetcher.fetch(id, variant, target_size).await {
            Ok(blob) => {
                let cost = blob.len() as u64;
                self.cache.put(variant, key.clone(), blob.clone(), cost);
                // Contrôle de vie : si l'élément a été évincé entre-temps,
                // la fenêtre refuse l'écriture et rien d'autre n'est touché
                if !self.window.mark_load_state(id, LoadState::Loaded) {
                    tracing::debug!(asset = %id, "Completion for evicted record, state untouched");
                }
                Ok(blob)
            }
            Err(err) => {
                tracing::warn!(asset = %id, %variant, error = %err, "Image fetch failed");
                self.window.mark_load_state(id, LoadState::Failed);
                Err(err.to_string())
            }
        };

        {
            let mut inflight = self.inflight.write().await;
            inflight.remove(&key);
        }
        task.complete(outcome.clone()).await;

        outcome.ok()
    }

    /// Précharge les vignettes des premiers éléments d'une page fraîche.
    ///
    /// Optimisation de performance perçue : seuls les `preload_count`
    /// premiers éléments sont concernés, chacun dans une tâche détachée. Un
    /// préchargement raté n'empêche jamais le chargement à la demande quand
    /// l'élément devient visible.
    ///
    /// # Arguments
    ///
    /// * `records` - Éléments fraîchement ajoutés à la fenêtre
    /// * `target_size` - Dimensions cibles des vignettes
    pub fn preload(
        self: Arc<Self>,
        records: Vec<AssetRecord>,
        target_size: Option<(u32, u32)>,
    ) {
        let count = records.len().min(self.preload_count);
        for record in records.into_iter().take(count) {
            let coordinator = Arc::clone(&self);
            tokio::spawn(async move {
                if coordinator
                    .ensure_loaded(&record.id, Variant::Thumbnail, target_size)
                    .await
                    .is_none()
                {
                    tracing::debug!(asset = %record.id, "Thumbnail preload failed");
                }
            });
        }
    }

    /// Nombre de requêtes actuellement en vol.
    pub async fn inflight_count(&self) -> usize {
        self.inflight.read().await.len()
    }

    /// Nombre d'éléments préchargés par page.
    pub fn preload_count(&self) -> usize {
        self.preload_count
    }
}
