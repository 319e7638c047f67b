//! # pglwindow - Fenêtre glissante paginée sur une source d'éléments
//!
//! Cette crate maintient la séquence ordonnée et bornée en mémoire des
//! éléments chargés depuis une source paginée :
//! - Fetch de pages avec garde de réentrance et debounce
//! - Éviction par l'avant quand la fenêtre dépasse sa capacité, avec tenue
//!   du décalage global (`base_global_offset`)
//! - Machine à états `{Idle, FetchingPage, Error}` ; un échec conserve les
//!   éléments déjà chargés et reste ré-essayable
//! - Générations : un `reset()` invalide logiquement les fetches en vol,
//!   leurs résultats tardifs sont jetés à l'arrivée
//! - Canal d'évènements broadcast pour les consommateurs (pas de callback
//!   d'observation dans le modèle de données)
//!
//! # Invariants
//!
//! Pour tout `i`, `items[i].global_index == base_global_offset + i` ;
//! `items.len() <= max_window_size` après chaque application de page ;
//! `base_global_offset` ne décroît jamais entre deux `reset()`.
//!
//! # Exemple
//!
//! ```no_run
//! use pglsource::MemoryAssetSource;
//! use pglwindow::{PagedAssetWindow, WindowConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pglwindow::Result<()> {
//! let source = Arc::new(MemoryAssetSource::with_generated(500));
//! let window = PagedAssetWindow::new(source, WindowConfig::default())?;
//!
//! let mut _events = window.subscribe();
//! window.request_more().await?;
//!
//! let snapshot = window.snapshot();
//! println!("{} items, base {}", snapshot.items.len(), snapshot.base_global_offset);
//! # Ok(())
//! # }
//! ```

mod error;
mod event;
mod window;

#[cfg(feature = "pglconfig")]
mod config_ext;

// Réexports publics
pub use error::{Error, Result};
pub use event::WindowEvent;
pub use window::{FetchState, PagedAssetWindow, WindowConfig, WindowSnapshot};

#[cfg(feature = "pglconfig")]
pub use config_ext::WindowConfigExt;
