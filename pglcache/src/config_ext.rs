//! Extension pour intégrer les limites du cache dans pglconfig
//!
//! Ce module fournit le trait `ContentCacheConfigExt` qui permet de lire et
//! d'écrire les limites des deux partitions dans `pglconfig::Config`, et de
//! construire un cache configuré.

use anyhow::Result;
use pglconfig::Config;
use serde_yaml::{Number, Value};
use std::sync::Arc;

use crate::{ContentCache, FullsizePartition, PartitionConfig, ThumbnailPartition};

/// Trait d'extension pour ajouter la gestion du cache de contenus à pglconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pglcache::ContentCacheConfigExt;
/// use pglconfig::Config;
///
/// let config = Config::load_config("")?;
/// let cache = config.create_content_cache()?;
/// ```
pub trait ContentCacheConfigExt {
    /// Récupère la limite d'entrées de la partition vignettes.
    fn get_thumbnail_cache_size(&self) -> Result<usize>;

    /// Définit la limite d'entrées de la partition vignettes.
    fn set_thumbnail_cache_size(&self, size: usize) -> Result<()>;

    /// Récupère la limite d'entrées de la partition images complètes.
    fn get_fullsize_cache_size(&self) -> Result<usize>;

    /// Définit la limite d'entrées de la partition images complètes.
    fn set_fullsize_cache_size(&self, size: usize) -> Result<()>;

    /// Récupère le plafond de coût (octets) de la partition images complètes.
    fn get_fullsize_cost_limit(&self) -> Result<Option<u64>>;

    /// Crée une instance de cache configurée.
    fn create_content_cache(&self) -> Result<Arc<ContentCache>>;
}

fn get_usize(config: &Config, path: &[&str], default: usize) -> Result<usize> {
    match config.get_value(path) {
        Ok(Value::Number(n)) if n.is_i64() => Ok(n.as_i64().unwrap() as usize),
        Ok(Value::Number(n)) if n.is_u64() => Ok(n.as_u64().unwrap() as usize),
        _ => Ok(default),
    }
}

impl ContentCacheConfigExt for Config {
    fn get_thumbnail_cache_size(&self) -> Result<usize> {
        get_usize(
            self,
            &["cache", "thumbnails", "capacity"],
            ThumbnailPartition::default_capacity(),
        )
    }

    fn set_thumbnail_cache_size(&self, size: usize) -> Result<()> {
        self.set_value(
            &["cache", "thumbnails", "capacity"],
            Value::Number(Number::from(size)),
        )
    }

    fn get_fullsize_cache_size(&self) -> Result<usize> {
        get_usize(
            self,
            &["cache", "fullsize", "capacity"],
            FullsizePartition::default_capacity(),
        )
    }

    fn set_fullsize_cache_size(&self, size: usize) -> Result<()> {
        self.set_value(
            &["cache", "fullsize", "capacity"],
            Value::Number(Number::from(size)),
        )
    }

    fn get_fullsize_cost_limit(&self) -> Result<Option<u64>> {
        match self.get_value(&["cache", "fullsize", "cost_limit_bytes"]) {
            Ok(Value::Number(n)) if n.is_u64() => Ok(Some(n.as_u64().unwrap())),
            Ok(Value::Number(n)) if n.is_i64() => Ok(Some(n.as_i64().unwrap().max(0) as u64)),
            _ => Ok(FullsizePartition::default_cost_limit()),
        }
    }

    fn create_content_cache(&self) -> Result<Arc<ContentCache>> {
        let cache = ContentCache::with_limits(
            self.get_thumbnail_cache_size()?,
            self.get_fullsize_cache_size()?,
        );
        cache.set_cost_limit(pglsource::Variant::Fullsize, self.get_fullsize_cost_limit()?);
        Ok(Arc::new(cache))
    }
}
