use pglfavorites::FavoriteRegistry;
use pglgallery::{GalleryConfig, GalleryController};
use pglsource::{AccessStatus, LoadState, MemoryAssetSource, StaticGate, Variant};
use pglwindow::WindowConfig;
use std::sync::Arc;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

fn test_config() -> GalleryConfig {
    GalleryConfig {
        window: WindowConfig {
            page_size: 20,
            max_window_size: 40,
            debounce: Duration::ZERO,
        },
        ..GalleryConfig::default()
    }
}

fn gallery_over(source: Arc<MemoryAssetSource>) -> GalleryController {
    init_tracing();
    GalleryController::new(
        source.clone(),
        source,
        None,
        Arc::new(FavoriteRegistry::new()),
        test_config(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_load_more_fills_and_slides_the_window() {
    let source = Arc::new(MemoryAssetSource::with_generated(100));
    let gallery = gallery_over(source);

    assert!(gallery.load_more().await.unwrap());
    assert_eq!(gallery.snapshot().items.len(), 20);

    for _ in 0..2 {
        gallery.load_more().await.unwrap();
    }

    // Fenêtre de 40 : la troisième page a fait glisser la base à 20
    let snapshot = gallery.snapshot();
    assert_eq!(snapshot.items.len(), 40);
    assert_eq!(snapshot.base_global_offset, 20);
    for (i, record) in snapshot.items.iter().enumerate() {
        assert_eq!(record.global_index, snapshot.base_global_offset + i);
    }
}

#[tokio::test]
async fn test_preload_marks_first_fresh_records() {
    let source = Arc::new(MemoryAssetSource::with_generated(100));
    let gallery = gallery_over(source.clone());

    gallery.load_more().await.unwrap();

    // Les tâches de préchargement détachées aboutissent
    let mut attempts = 0;
    while source.images_fetched() < 10 && attempts < 100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        attempts += 1;
    }
    assert_eq!(source.images_fetched(), 10);

    let snapshot = gallery.snapshot();
    assert_eq!(
        snapshot
            .items
            .iter()
            .filter(|r| r.load_state == LoadState::Loaded)
            .count(),
        10
    );
    // Les éléments suivants restent en attente de chargement à la demande
    assert_eq!(snapshot.items[15].load_state, LoadState::Pending);
}

#[tokio::test]
async fn test_on_demand_thumbnail_and_full_image() {
    let source = Arc::new(MemoryAssetSource::with_generated(50));
    let gallery = gallery_over(source);

    gallery.load_more().await.unwrap();

    let thumb = gallery.thumbnail("asset-0015").await;
    assert!(thumb.is_some());
    assert_eq!(gallery.load_state("asset-0015"), Some(LoadState::Loaded));

    // La vue de détail demande l'image complète : autre partition
    let full = gallery.full_image("asset-0015", None).await;
    assert!(full.is_some());
    assert_ne!(thumb, full);
    assert_eq!(gallery.cache().len(Variant::Fullsize), 1);
}

#[tokio::test]
async fn test_denied_gate_shows_permission_status() {
    let source = Arc::new(MemoryAssetSource::with_generated(50));
    let gallery = GalleryController::new(
        source.clone(),
        source.clone(),
        Some(Arc::new(StaticGate::denied())),
        Arc::new(FavoriteRegistry::new()),
        test_config(),
    )
    .unwrap();

    assert_eq!(gallery.access_status(), AccessStatus::Denied);
    assert!(!gallery.load_more().await.unwrap());
    assert_eq!(source.pages_fetched(), 0);
    assert_eq!(gallery.loading_status(), "Photo access is required");
}

#[tokio::test]
async fn test_loading_status_reports_progress() {
    let source = Arc::new(MemoryAssetSource::with_generated(100));
    let gallery = gallery_over(source);

    assert_eq!(gallery.loading_status(), "Loaded 0 of 0 photos");
    gallery.load_more().await.unwrap();
    assert_eq!(gallery.loading_status(), "Loaded 20 of 100 photos");

    assert_eq!(gallery.total_photo_count().await.unwrap(), 100);
}

#[tokio::test]
async fn test_reset_preserves_image_cache() {
    let source = Arc::new(MemoryAssetSource::with_generated(50));
    let gallery = gallery_over(source.clone());

    gallery.load_more().await.unwrap();
    gallery.thumbnail("asset-0000").await.unwrap();

    // Attendre la fin des préchargements détachés avant de figer le compteur
    let mut attempts = 0;
    while source.images_fetched() < 10 && attempts < 100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        attempts += 1;
    }
    let fetched_before = source.images_fetched();

    gallery.reset();
    assert!(gallery.snapshot().items.is_empty());

    // Le même identifiant réapparaît : servi depuis le cache, pas de fetch
    gallery.load_more().await.unwrap();
    gallery.thumbnail("asset-0000").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(source.images_fetched(), fetched_before);
}

#[tokio::test]
async fn test_favorite_toggle_is_immediate() {
    let source = Arc::new(MemoryAssetSource::with_generated(10));
    let gallery = gallery_over(source);

    assert!(!gallery.is_favorite("asset-0003"));
    assert!(gallery.toggle_favorite("asset-0003"));
    assert!(gallery.is_favorite("asset-0003"));
    assert_eq!(gallery.favorite_count(), 1);

    assert!(!gallery.toggle_favorite("asset-0003"));
    assert!(!gallery.is_favorite("asset-0003"));
}

#[cfg(feature = "pglconfig")]
#[tokio::test]
async fn test_new_configured_wires_everything() {
    use pglconfig::Config;
    use serde_yaml::{Number, Value};

    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    config
        .set_value(&["gallery", "page_size"], Value::Number(Number::from(10)))
        .unwrap();
    config
        .set_value(&["gallery", "debounce_ms"], Value::Number(Number::from(0)))
        .unwrap();

    let source = Arc::new(MemoryAssetSource::with_generated(30));
    let gallery =
        GalleryController::new_configured(&config, source.clone(), source, None)
            .await
            .unwrap();

    gallery.load_more().await.unwrap();
    assert_eq!(gallery.snapshot().items.len(), 10);

    // Les favoris persistent dans le répertoire de configuration
    gallery.toggle_favorite("asset-0001");
    gallery.favorites().flush().await.unwrap();
    assert!(dir.path().join("favorites.json").exists());
}
