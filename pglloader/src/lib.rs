//! # pglloader - Coordinateur de chargement d'images pour PGLPhoto
//!
//! Cette crate émet les requêtes d'images pour les éléments présents dans la
//! fenêtre paginée :
//! - Consultation du cache avant tout fetch ; un hit court-circuite le
//!   collaborateur d'images
//! - Déduplication : au plus une requête en vol par clé `(id, variante,
//!   dimensions)` ; les appels concurrents s'attachent au même résultat
//! - Transitions d'état `Pending → Loading → Loaded | Failed` écrites via la
//!   fenêtre, qui refuse les écritures pour les éléments évincés
//! - Les échecs ne sont jamais mis en cache : un nouvel essai reste possible
//! - Préchargement détaché des premiers éléments d'une page fraîche
//!
//! # Exemple
//!
//! ```no_run
//! use pglcache::ContentCache;
//! use pglloader::ImageLoadCoordinator;
//! use pglsource::{MemoryAssetSource, Variant};
//! use pglwindow::{PagedAssetWindow, WindowConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pglwindow::Result<()> {
//! let source = Arc::new(MemoryAssetSource::with_generated(100));
//! let cache = Arc::new(ContentCache::new());
//! let window = Arc::new(PagedAssetWindow::new(source.clone(), WindowConfig::default())?);
//! let coordinator = Arc::new(ImageLoadCoordinator::new(
//!     cache,
//!     Arc::clone(&window),
//!     source,
//! ));
//!
//! window.request_more().await?;
//! let blob = coordinator
//!     .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
//!     .await;
//! # Ok(())
//! # }
//! ```

mod coordinator;
mod task;

#[cfg(feature = "pglconfig")]
mod config_ext;

// Réexports publics
pub use coordinator::{ImageLoadCoordinator, DEFAULT_PRELOAD_COUNT};
pub use task::LoadTask;

#[cfg(feature = "pglconfig")]
pub use config_ext::LoaderConfigExt;
