//! # pglgallery - Contrôleur de galerie pour PGLPhoto
//!
//! Cette crate assemble les composants du cœur PGLPhoto et expose la surface
//! de requête destinée à la couche de rendu :
//! - Câblage explicite source + garde d'accès + cache + fenêtre +
//!   coordinateur + favoris (aucun état global)
//! - Pagination avec préchargement des vignettes d'une page fraîche
//! - Chargement à la demande des vignettes et images complètes
//! - Ligne de statut lisible, favoris, dernier message d'erreur
//!
//! # Architecture
//!
//! ```text
//! AssetSource ──▶ PagedAssetWindow ──▶ ImageLoadCoordinator ──▶ ContentCache
//!                      │                                            │
//!                      └──────────── GalleryController ◀────────────┘
//!                                         │
//!                                   FavoriteRegistry
//! ```
//!
//! # Exemple
//!
//! ```no_run
//! use pglfavorites::FavoriteRegistry;
//! use pglgallery::{GalleryConfig, GalleryController};
//! use pglsource::MemoryAssetSource;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pglwindow::Result<()> {
//! let source = Arc::new(MemoryAssetSource::with_generated(500));
//! let gallery = GalleryController::new(
//!     source.clone(),
//!     source,
//!     None,
//!     Arc::new(FavoriteRegistry::new()),
//!     GalleryConfig::default(),
//! )?;
//!
//! gallery.load_more().await?;
//! for record in gallery.snapshot().items {
//!     println!("{} ({:?})", record.id, record.load_state);
//! }
//! # Ok(())
//! # }
//! ```

mod controller;

// Réexports publics
pub use controller::{GalleryConfig, GalleryController};
