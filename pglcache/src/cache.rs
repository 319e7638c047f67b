//! ContentCache : les deux partitions du cache d'images

use crate::partition::{FullsizePartition, Partition, ThumbnailPartition};
use bytes::Bytes;
use pglsource::Variant;

/// Cache clé → blob à deux partitions indépendantes
///
/// La partition des vignettes et celle des images complètes ont chacune leur
/// limite de nombre d'entrées et leur plafond de coût ; l'éviction de l'une
/// n'affecte jamais l'autre.
///
/// Note : ce type est conçu pour être utilisé derrière un `Arc<ContentCache>`.
/// La synchronisation est gérée par le mutex interne de chaque partition.
///
/// # Exemple
///
/// ```
/// use bytes::Bytes;
/// use pglcache::{cache_key, ContentCache};
/// use pglsource::Variant;
///
/// let cache = ContentCache::with_limits(150, 10);
/// let key = cache_key("asset-1", Variant::Thumbnail, Some((200, 200)));
/// cache.put(Variant::Thumbnail, key.clone(), Bytes::from_static(b"png"), 3);
///
/// assert_eq!(cache.get(Variant::Thumbnail, &key).unwrap(), Bytes::from_static(b"png"));
/// assert!(cache.get(Variant::Fullsize, &key).is_none());
/// ```
pub struct ContentCache {
    thumbnails: Partition<ThumbnailPartition>,
    fullsize: Partition<FullsizePartition>,
}

impl ContentCache {
    /// Crée le cache avec les limites par défaut des deux partitions.
    pub fn new() -> Self {
        Self {
            thumbnails: Partition::new(),
            fullsize: Partition::new(),
        }
    }

    /// Crée le cache avec des limites de nombre explicites.
    ///
    /// Les plafonds de coût restent ceux par défaut de chaque partition ;
    /// [`ContentCache::set_cost_limit`] permet de les ajuster ensuite.
    ///
    /// # Arguments
    ///
    /// * `thumbnail_capacity` - Limite d'entrées de la partition vignettes
    /// * `fullsize_capacity` - Limite d'entrées de la partition images complètes
    pub fn with_limits(thumbnail_capacity: usize, fullsize_capacity: usize) -> Self {
        Self {
            thumbnails: Partition::with_limits(
                thumbnail_capacity,
                <ThumbnailPartition as crate::PartitionConfig>::default_cost_limit(),
            ),
            fullsize: Partition::with_limits(
                fullsize_capacity,
                <FullsizePartition as crate::PartitionConfig>::default_cost_limit(),
            ),
        }
    }

    /// Récupère un blob dans la partition de la variante.
    ///
    /// Un hit rafraîchit la récence de l'entrée ; un miss n'a aucun effet.
    pub fn get(&self, variant: Variant, key: &str) -> Option<Bytes> {
        match variant {
            Variant::Thumbnail => self.thumbnails.get(key),
            Variant::Fullsize => self.fullsize.get(key),
        }
    }

    /// Insère un blob avec son coût dans la partition de la variante.
    pub fn put(&self, variant: Variant, key: String, blob: Bytes, cost: u64) {
        match variant {
            Variant::Thumbnail => self.thumbnails.put(key, blob, cost),
            Variant::Fullsize => self.fullsize.put(key, blob, cost),
        }
    }

    /// Reconfigure les limites de nombre à chaud.
    ///
    /// Seules les limites fournies changent ; une limite inférieure à
    /// l'occupation courante déclenche une éviction LRU immédiate.
    ///
    /// # Arguments
    ///
    /// * `thumbnails` - Nouvelle limite de la partition vignettes, si fournie
    /// * `full_images` - Nouvelle limite de la partition images complètes, si fournie
    pub fn configure(&self, thumbnails: Option<usize>, full_images: Option<usize>) {
        if let Some(capacity) = thumbnails {
            self.thumbnails.set_capacity(capacity);
        }
        if let Some(capacity) = full_images {
            self.fullsize.set_capacity(capacity);
        }
    }

    /// Change le plafond de coût d'une partition.
    pub fn set_cost_limit(&self, variant: Variant, cost_limit: Option<u64>) {
        match variant {
            Variant::Thumbnail => self.thumbnails.set_cost_limit(cost_limit),
            Variant::Fullsize => self.fullsize.set_cost_limit(cost_limit),
        }
    }

    /// Vide une partition, ou les deux si `partition` est `None`.
    pub fn clear(&self, partition: Option<Variant>) {
        match partition {
            Some(Variant::Thumbnail) => self.thumbnails.clear(),
            Some(Variant::Fullsize) => self.fullsize.clear(),
            None => {
                self.thumbnails.clear();
                self.fullsize.clear();
            }
        }
    }

    /// Nombre d'entrées d'une partition.
    pub fn len(&self, variant: Variant) -> usize {
        match variant {
            Variant::Thumbnail => self.thumbnails.len(),
            Variant::Fullsize => self.fullsize.len(),
        }
    }

    pub fn is_empty(&self, variant: Variant) -> bool {
        self.len(variant) == 0
    }

    /// Coût total des entrées d'une partition.
    pub fn total_cost(&self, variant: Variant) -> u64 {
        match variant {
            Variant::Thumbnail => self.thumbnails.total_cost(),
            Variant::Fullsize => self.fullsize.total_cost(),
        }
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}
