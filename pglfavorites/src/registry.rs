//! FavoriteRegistry : ensemble des favoris avec persistance différée

use crate::error::{Error, Result};
use crate::store::FavoriteStore;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Registre des identifiants favoris
///
/// L'ensemble en mémoire fait foi : `contains` reflète immédiatement chaque
/// mutation, la persistance court derrière sur une tâche détachée. Un échec
/// d'écriture est journalisé et l'état disque sera rattrapé à la prochaine
/// mutation.
///
/// Note : ce type est conçu pour être utilisé derrière un
/// `Arc<FavoriteRegistry>`.
pub struct FavoriteRegistry {
    favorites: RwLock<HashSet<String>>,
    store: Option<Arc<dyn FavoriteStore>>,
}

impl FavoriteRegistry {
    /// Crée un registre purement en mémoire (sans persistance).
    pub fn new() -> Self {
        Self {
            favorites: RwLock::new(HashSet::new()),
            store: None,
        }
    }

    /// Crée un registre adossé à un backend et charge son contenu.
    ///
    /// # Arguments
    ///
    /// * `store` - Backend de persistance
    pub async fn with_store(store: Arc<dyn FavoriteStore>) -> Result<Self> {
        let ids = store
            .load()
            .await
            .map_err(|err| Error::Persistence(err.to_string()))?;
        tracing::debug!(count = ids.len(), "Loaded persisted favorites");

        Ok(Self {
            favorites: RwLock::new(ids.into_iter().collect()),
            store: Some(store),
        })
    }

    /// L'identifiant est-il favori ?
    pub fn contains(&self, id: &str) -> bool {
        self.favorites.read().unwrap().contains(id)
    }

    /// Bascule l'état favori d'un identifiant.
    ///
    /// # Returns
    ///
    /// Le nouvel état : `true` si l'identifiant vient d'être ajouté.
    pub fn toggle(&self, id: &str) -> bool {
        let now_favorite = {
            let mut favorites = self.favorites.write().unwrap();
            if !favorites.remove(id) {
                favorites.insert(id.to_string());
                true
            } else {
                false
            }
        };
        self.persist_async();
        now_favorite
    }

    /// Ajoute un identifiant aux favoris.
    pub fn add(&self, id: &str) {
        let inserted = self.favorites.write().unwrap().insert(id.to_string());
        if inserted {
            self.persist_async();
        }
    }

    /// Retire un identifiant des favoris.
    pub fn remove(&self, id: &str) {
        let removed = self.favorites.write().unwrap().remove(id);
        if removed {
            self.persist_async();
        }
    }

    /// Identifiants favoris, sans ordre particulier.
    pub fn ids(&self) -> Vec<String> {
        self.favorites.read().unwrap().iter().cloned().collect()
    }

    /// Nombre de favoris.
    pub fn len(&self) -> usize {
        self.favorites.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Écrit l'ensemble courant sur le backend, sans bloquer l'appelant.
    fn persist_async(&self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let snapshot = self.ids();
        tokio::spawn(async move {
            if let Err(err) = store.save(&snapshot).await {
                tracing::warn!(error = %err, "Failed to persist favorites");
            }
        });
    }

    /// Écrit l'ensemble courant et attend la fin de l'écriture.
    ///
    /// Utile à l'arrêt de l'application ou dans les tests ; le chemin normal
    /// passe par la persistance détachée.
    pub async fn flush(&self) -> Result<()> {
        let Some(store) = self.store.clone() else {
            return Ok(());
        };
        let snapshot = self.ids();
        store
            .save(&snapshot)
            .await
            .map_err(|err| Error::Persistence(err.to_string()))
    }
}

impl Default for FavoriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
