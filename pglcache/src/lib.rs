//! # pglcache - Cache de contenus borné pour PGLPhoto
//!
//! Cette crate fournit le cache clé → blob à deux partitions indépendantes
//! (vignettes et images complètes), chacune avec sa propre limite de nombre
//! d'entrées, un plafond de coût optionnel et une éviction LRU.
//!
//! ## Vue d'ensemble
//!
//! `pglcache` fournit les composants de base pour :
//! - Stocker des blobs d'images en mémoire, bornés par partition
//! - Dériver des clés déterministes à partir de `(id, variante, dimensions)`
//! - Rafraîchir la récence à chaque accès et évincer les entrées les moins
//!   récemment utilisées
//! - Reconfigurer les limites à chaud
//!
//! ## Architecture
//!
//! ```text
//! pglcache
//!     ├── key.rs        - Dérivation des clés de cache
//!     ├── partition.rs  - Partition LRU bornée (générique)
//!     └── cache.rs      - ContentCache : les deux partitions
//! ```
//!
//! ## Utilisation
//!
//! ```rust
//! use bytes::Bytes;
//! use pglcache::{cache_key, ContentCache};
//! use pglsource::Variant;
//!
//! let cache = ContentCache::new();
//! let key = cache_key("asset-42", Variant::Thumbnail, Some((200, 200)));
//!
//! cache.put(Variant::Thumbnail, key.clone(), Bytes::from_static(b"..."), 3);
//! assert!(cache.get(Variant::Thumbnail, &key).is_some());
//! ```
//!
//! ## Sémantique des limites
//!
//! Une capacité de `0` désactive la partition : `put` n'y stocke rien et
//! `get` répond toujours absent. Aucune opération de cette crate ne suspend ;
//! la synchronisation repose sur un mutex par partition.

pub mod cache;
pub mod key;
pub mod partition;

#[cfg(feature = "pglconfig")]
pub mod config_ext;

pub use cache::ContentCache;
pub use key::cache_key;
pub use partition::{FullsizePartition, Partition, PartitionConfig, ThumbnailPartition};

#[cfg(feature = "pglconfig")]
pub use config_ext::ContentCacheConfigExt;
