//! Parcours complet d'une galerie en mémoire
//!
//! Lance un contrôleur sur une source synthétique, fait défiler quelques
//! pages, charge une image de détail et bascule un favori.
//!
//! ```bash
//! cargo run --example browse_gallery -p pglgallery
//! ```

use pglfavorites::FavoriteRegistry;
use pglgallery::{GalleryConfig, GalleryController};
use pglsource::MemoryAssetSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let source = Arc::new(MemoryAssetSource::with_generated(500));
    let gallery = GalleryController::new(
        source.clone(),
        source,
        None,
        Arc::new(FavoriteRegistry::new()),
        GalleryConfig::default(),
    )?;

    let mut events = gallery.subscribe();

    // Simuler un défilement : une page, puis les suivantes après le debounce
    for _ in 0..4 {
        gallery.load_more().await?;
        println!("{}", gallery.loading_status());
        tokio::time::sleep(Duration::from_millis(600)).await;
    }

    let snapshot = gallery.snapshot();
    println!(
        "Window: {} items, base offset {}, has_more={}",
        snapshot.items.len(),
        snapshot.base_global_offset,
        snapshot.has_more
    );

    // Vue de détail sur le premier élément visible
    let first = &snapshot.items[0];
    if let Some(blob) = gallery.full_image(&first.id, None).await {
        println!("Full image for {}: {} bytes", first.id, blob.len());
    }

    // Favori
    gallery.toggle_favorite(&first.id);
    println!(
        "{} favorite: {} ({} total)",
        first.id,
        gallery.is_favorite(&first.id),
        gallery.favorite_count()
    );

    // Quelques évènements reçus pendant le parcours
    loop {
        match events.try_recv() {
            Ok(event) => println!("event: {event:?}"),
            Err(TryRecvError::Lagged(skipped)) => println!("(skipped {skipped} events)"),
            Err(_) => break,
        }
    }

    Ok(())
}
