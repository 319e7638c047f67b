//! Partition LRU bornée du cache de contenus

use bytes::Bytes;
use lru::LruCache;
use std::marker::PhantomData;
use std::sync::Mutex;

/// Paramètres statiques d'une partition de cache.
pub trait PartitionConfig: Send + Sync {
    /// Nom de la partition (ex: `"thumbnails"`). Sert pour les logs et la
    /// configuration.
    fn partition_name() -> &'static str;

    /// Nombre maximal d'entrées par défaut.
    fn default_capacity() -> usize;

    /// Plafond de coût total par défaut (en octets), si la partition en a un.
    fn default_cost_limit() -> Option<u64> {
        None
    }
}

/// Partition des vignettes (grille de la galerie)
pub struct ThumbnailPartition;

impl PartitionConfig for ThumbnailPartition {
    fn partition_name() -> &'static str {
        "thumbnails"
    }

    fn default_capacity() -> usize {
        150
    }
}

/// Partition des images complètes (vue de détail)
///
/// Peu d'entrées mais lourdes, d'où le plafond de coût en plus de la limite
/// de nombre.
pub struct FullsizePartition;

impl PartitionConfig for FullsizePartition {
    fn partition_name() -> &'static str {
        "fullsize"
    }

    fn default_capacity() -> usize {
        10
    }

    fn default_cost_limit() -> Option<u64> {
        Some(50 * 1024 * 1024)
    }
}

/// Une entrée stockée avec son coût
struct StoredEntry {
    blob: Bytes,
    cost: u64,
}

/// État interne d'une partition, protégé par le mutex
struct PartitionInner {
    /// Map ordonnée par récence ; la capacité est appliquée manuellement
    /// pour tenir la comptabilité de coût lors des évictions
    entries: LruCache<String, StoredEntry>,
    capacity: usize,
    cost_limit: Option<u64>,
    total_cost: u64,
}

impl PartitionInner {
    /// Évince les entrées les moins récemment utilisées jusqu'à respecter la
    /// capacité et le plafond de coût.
    fn enforce_limits(&mut self, name: &'static str) {
        let mut evicted = 0usize;
        while self.entries.len() > self.capacity
            || self.cost_limit.is_some_and(|limit| self.total_cost > limit)
        {
            match self.entries.pop_lru() {
                Some((_, entry)) => {
                    self.total_cost -= entry.cost;
                    evicted += 1;
                }
                None => break,
            }
        }

        if evicted > 0 {
            tracing::debug!(
                partition = name,
                evicted,
                remaining = self.entries.len(),
                "LRU eviction"
            );
        }
    }
}

/// Partition LRU bornée
///
/// # Paramètres de type
///
/// * `C` - Configuration de la partition (implémente `PartitionConfig`)
///
/// Aucune opération ne suspend : les insertions et évictions s'exécutent
/// entièrement sous le mutex interne, si bien qu'aucun lecteur n'observe une
/// partition transitoirement au-delà de ses limites.
pub struct Partition<C: PartitionConfig> {
    inner: Mutex<PartitionInner>,
    _phantom: PhantomData<C>,
}

impl<C: PartitionConfig> Partition<C> {
    /// Crée la partition avec les limites par défaut de sa configuration.
    pub fn new() -> Self {
        Self::with_limits(C::default_capacity(), C::default_cost_limit())
    }

    /// Crée la partition avec des limites explicites.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Nombre maximal d'entrées (`0` désactive la partition)
    /// * `cost_limit` - Plafond de coût total en octets, ou `None`
    pub fn with_limits(capacity: usize, cost_limit: Option<u64>) -> Self {
        Self {
            inner: Mutex::new(PartitionInner {
                entries: LruCache::unbounded(),
                capacity,
                cost_limit,
                total_cost: 0,
            }),
            _phantom: PhantomData,
        }
    }

    /// Récupère un blob ; un hit rafraîchit la récence, un miss n'a aucun
    /// effet de bord.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.get(key).map(|entry| entry.blob.clone())
    }

    /// Insère un blob avec son coût.
    ///
    /// Si la partition est désactivée (capacité `0`), l'insertion est
    /// silencieusement ignorée. Sinon l'insertion et les évictions qui la
    /// ramènent sous ses limites forment une seule section critique.
    pub fn put(&self, key: String, blob: Bytes, cost: u64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.capacity == 0 {
            return;
        }

        if let Some(previous) = inner.entries.put(key, StoredEntry { blob, cost }) {
            inner.total_cost -= previous.cost;
        }
        inner.total_cost += cost;
        inner.enforce_limits(C::partition_name());
    }

    /// Change la limite de nombre d'entrées ; évince immédiatement si la
    /// nouvelle limite est inférieure à l'occupation courante.
    pub fn set_capacity(&self, capacity: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.capacity = capacity;
        if capacity == 0 {
            inner.entries.clear();
            inner.total_cost = 0;
            return;
        }
        inner.enforce_limits(C::partition_name());
    }

    /// Change le plafond de coût ; évince immédiatement si nécessaire.
    pub fn set_cost_limit(&self, cost_limit: Option<u64>) {
        let mut inner = self.inner.lock().unwrap();
        inner.cost_limit = cost_limit;
        inner.enforce_limits(C::partition_name());
    }

    /// Vide la partition.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.total_cost = 0;
    }

    /// Nombre d'entrées présentes.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coût total des entrées présentes.
    pub fn total_cost(&self) -> u64 {
        self.inner.lock().unwrap().total_cost
    }
}

impl<C: PartitionConfig> Default for Partition<C> {
    fn default() -> Self {
        Self::new()
    }
}
