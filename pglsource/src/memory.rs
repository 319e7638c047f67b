//! Source d'éléments en mémoire
//!
//! Implémentation de référence de [`AssetSource`] et [`ImageFetcher`] sur une
//! collection figée. Sert de doublure de test à tout l'écosystème et de point
//! de départ pour des sources réelles.

use crate::fetch::{FetchError, ImageFetcher};
use crate::source::{AssetSource, validate_page_request};
use crate::types::{AssetEntry, AssetMetadata, AssetPage, Variant};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::DateTime;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Un élément tel que stocké par la source mémoire
#[derive(Debug, Clone)]
pub struct MemoryAsset {
    pub id: String,
    pub metadata: AssetMetadata,
    /// Octets de l'image complète ; les variantes sont dérivées à la demande
    pub blob: Bytes,
}

/// Source paginée en mémoire, ordonnée par date de création décroissante
///
/// Les compteurs de fetch permettent aux tests de vérifier la déduplication
/// et les courts-circuits de cache.
pub struct MemoryAssetSource {
    assets: Vec<MemoryAsset>,
    pages_fetched: AtomicUsize,
    images_fetched: AtomicUsize,
}

impl MemoryAssetSource {
    /// Construit la source sur une collection existante.
    ///
    /// La collection est triée par `created_at` décroissant (les éléments les
    /// plus récents d'abord), l'ordre stable attendu par la pagination.
    pub fn new(mut assets: Vec<MemoryAsset>) -> Self {
        assets.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
        Self {
            assets,
            pages_fetched: AtomicUsize::new(0),
            images_fetched: AtomicUsize::new(0),
        }
    }

    /// Génère une collection synthétique de `count` éléments.
    ///
    /// Identifiants `asset-0000`, `asset-0001`, … datés à une minute
    /// d'intervalle, du plus récent au plus ancien.
    pub fn with_generated(count: usize) -> Self {
        const BASE_TIMESTAMP: i64 = 1_700_000_000;

        let assets = (0..count)
            .map(|i| {
                let id = format!("asset-{i:04}");
                let created_at =
                    DateTime::from_timestamp(BASE_TIMESTAMP - (i as i64) * 60, 0)
                        .unwrap_or_default();
                MemoryAsset {
                    blob: Bytes::from(format!("image-bytes-of-{id}")),
                    metadata: AssetMetadata {
                        width: 4032,
                        height: 3024,
                        created_at,
                        byte_size: Some(2_000_000),
                        location: None,
                    },
                    id,
                }
            })
            .collect();
        Self::new(assets)
    }

    /// Nombre de pages servies depuis la construction.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    /// Nombre de blobs d'images servis depuis la construction.
    pub fn images_fetched(&self) -> usize {
        self.images_fetched.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AssetSource for MemoryAssetSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<AssetPage> {
        validate_page_request(limit)?;
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);

        let total_count = self.assets.len();
        if offset >= total_count {
            tracing::debug!(offset, total_count, "Page request past end of collection");
            return Ok(AssetPage::empty(total_count));
        }

        let end = (offset + limit).min(total_count);
        let entries = self.assets[offset..end]
            .iter()
            .map(|asset| AssetEntry {
                id: asset.id.clone(),
                metadata: asset.metadata.clone(),
            })
            .collect();

        Ok(AssetPage {
            entries,
            total_count,
        })
    }

    async fn total_count(&self) -> Result<usize> {
        Ok(self.assets.len())
    }
}

#[async_trait]
impl ImageFetcher for MemoryAssetSource {
    async fn fetch(
        &self,
        id: &str,
        variant: Variant,
        target_size: Option<(u32, u32)>,
    ) -> Result<Bytes, FetchError> {
        self.images_fetched.fetch_add(1, Ordering::Relaxed);

        let asset = self
            .assets
            .iter()
            .find(|asset| asset.id == id)
            .ok_or(FetchError::NotFound)?;

        // La variante vignette est dérivée du blob original ; une vraie
        // source décoderait et redimensionnerait ici.
        let blob = match (variant, target_size) {
            (Variant::Fullsize, _) => asset.blob.clone(),
            (Variant::Thumbnail, Some((w, h))) => {
                Bytes::from(format!("thumb-{w}x{h}-of-{id}"))
            }
            (Variant::Thumbnail, None) => Bytes::from(format!("thumb-of-{id}")),
        };

        Ok(blob)
    }
}
