//! # pglfavorites - Registre des favoris pour PGLPhoto
//!
//! Cette crate maintient l'ensemble persisté des identifiants favoris :
//! - Lectures O(1) sur un ensemble en mémoire
//! - Bascule immédiate : `contains` reflète un `toggle` avant même que la
//!   persistance ne s'achève
//! - Persistance asynchrone derrière le trait [`FavoriteStore`] ; les échecs
//!   d'écriture sont journalisés, jamais remontés à l'appelant
//! - Backend fourni : [`JsonFileStore`], un tableau JSON sur disque
//!
//! # Exemple
//!
//! ```no_run
//! use pglfavorites::{FavoriteRegistry, JsonFileStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pglfavorites::Result<()> {
//! let store = Arc::new(JsonFileStore::new("favorites.json"));
//! let registry = FavoriteRegistry::with_store(store).await?;
//!
//! registry.toggle("asset-42");
//! assert!(registry.contains("asset-42"));
//! # Ok(())
//! # }
//! ```

mod error;
mod registry;
mod store;

#[cfg(feature = "pglconfig")]
mod config_ext;

// Réexports publics
pub use error::{Error, Result};
pub use registry::FavoriteRegistry;
pub use store::{FavoriteStore, JsonFileStore};

#[cfg(feature = "pglconfig")]
pub use config_ext::FavoritesConfigExt;
