use async_trait::async_trait;
use bytes::Bytes;
use pglcache::ContentCache;
use pglloader::ImageLoadCoordinator;
use pglsource::{FetchError, ImageFetcher, LoadState, MemoryAssetSource, Variant};
use pglwindow::{PagedAssetWindow, WindowConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fetcher instrumenté : compteur d'appels, latence et échecs scriptés
struct CountingFetcher {
    fetches: AtomicUsize,
    delay: Duration,
    failures_left: AtomicUsize,
}

impl CountingFetcher {
    fn new(delay: Duration) -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            delay,
            failures_left: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for CountingFetcher {
    async fn fetch(
        &self,
        id: &str,
        variant: Variant,
        _target_size: Option<(u32, u32)>,
    ) -> Result<Bytes, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(FetchError::FetchFailed("decode error".into()));
        }
        Ok(Bytes::from(format!("{variant}-{id}")))
    }
}

struct Fixture {
    window: Arc<PagedAssetWindow>,
    cache: Arc<ContentCache>,
    fetcher: Arc<CountingFetcher>,
    coordinator: Arc<ImageLoadCoordinator>,
}

async fn fixture(fetcher_delay: Duration) -> Fixture {
    let source = Arc::new(MemoryAssetSource::with_generated(100));
    let config = WindowConfig {
        page_size: 20,
        max_window_size: 40,
        debounce: Duration::ZERO,
    };
    let window = Arc::new(PagedAssetWindow::new(source, config).unwrap());
    window.request_more().await.unwrap();

    let cache = Arc::new(ContentCache::new());
    let fetcher = Arc::new(CountingFetcher::new(fetcher_delay));
    let coordinator = Arc::new(ImageLoadCoordinator::new(
        Arc::clone(&cache),
        Arc::clone(&window),
        Arc::clone(&fetcher) as Arc<dyn ImageFetcher>,
    ));

    Fixture {
        window,
        cache,
        fetcher,
        coordinator,
    }
}

#[tokio::test]
async fn test_cache_hit_short_circuits_fetch() {
    let fx = fixture(Duration::ZERO).await;

    let first = fx
        .coordinator
        .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
        .await
        .unwrap();
    assert_eq!(fx.fetcher.fetches(), 1);
    assert_eq!(
        fx.window.get("asset-0000").unwrap().load_state,
        LoadState::Loaded
    );

    // Second appel : servi depuis le cache, aucun fetch émis
    let second = fx
        .coordinator
        .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(fx.fetcher.fetches(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_fetch() {
    let fx = fixture(Duration::from_millis(50)).await;

    let (a, b) = tokio::join!(
        fx.coordinator
            .ensure_loaded("asset-0001", Variant::Thumbnail, Some((200, 200))),
        fx.coordinator
            .ensure_loaded("asset-0001", Variant::Thumbnail, Some((200, 200))),
    );

    // Exactement un fetch sous-jacent, les deux appels reçoivent le blob
    assert_eq!(fx.fetcher.fetches(), 1);
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(fx.coordinator.inflight_count().await, 0);
}

#[tokio::test]
async fn test_variants_do_not_share_entries() {
    let fx = fixture(Duration::ZERO).await;

    fx.coordinator
        .ensure_loaded("asset-0002", Variant::Thumbnail, Some((200, 200)))
        .await
        .unwrap();
    fx.coordinator
        .ensure_loaded("asset-0002", Variant::Fullsize, None)
        .await
        .unwrap();

    assert_eq!(fx.fetcher.fetches(), 2);
    assert_eq!(fx.cache.len(Variant::Thumbnail), 1);
    assert_eq!(fx.cache.len(Variant::Fullsize), 1);
}

#[tokio::test]
async fn test_failure_marks_failed_and_stays_retryable() {
    let fx = fixture(Duration::ZERO).await;
    fx.fetcher.failures_left.store(1, Ordering::SeqCst);

    // L'échec ne remonte pas : None, état Failed, cache intact
    let result = fx
        .coordinator
        .ensure_loaded("asset-0003", Variant::Thumbnail, Some((200, 200)))
        .await;
    assert!(result.is_none());
    assert_eq!(
        fx.window.get("asset-0003").unwrap().load_state,
        LoadState::Failed
    );
    assert_eq!(fx.cache.len(Variant::Thumbnail), 0);

    // Un nouvel essai émet un nouveau fetch et aboutit
    let retried = fx
        .coordinator
        .ensure_loaded("asset-0003", Variant::Thumbnail, Some((200, 200)))
        .await;
    assert!(retried.is_some());
    assert_eq!(fx.fetcher.fetches(), 2);
    assert_eq!(
        fx.window.get("asset-0003").unwrap().load_state,
        LoadState::Loaded
    );
}

#[tokio::test]
async fn test_completion_for_evicted_record_is_harmless() {
    let fx = fixture(Duration::from_millis(100)).await;

    let in_flight = {
        let coordinator = Arc::clone(&fx.coordinator);
        tokio::spawn(async move {
            coordinator
                .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
                .await
        })
    };

    // Deux pages de plus pendant le fetch : asset-0000 sort de la fenêtre
    tokio::time::sleep(Duration::from_millis(20)).await;
    fx.window.request_more().await.unwrap();
    fx.window.request_more().await.unwrap();
    assert!(fx.window.get("asset-0000").is_none());

    // La complétion aboutit sans écrire d'état dans un emplacement réutilisé
    let blob = in_flight.await.unwrap();
    assert!(blob.is_some());
    for record in fx.window.snapshot().items {
        assert_eq!(record.load_state, LoadState::Pending);
    }
}

#[tokio::test]
async fn test_preload_covers_first_items_only() {
    let fx = fixture(Duration::ZERO).await;
    let appended = fx.window.snapshot().items;
    assert_eq!(appended.len(), 20);

    Arc::clone(&fx.coordinator).preload(appended.clone(), Some((200, 200)));

    // Les tâches détachées se terminent rapidement avec un fetcher immédiat
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(fx.fetcher.fetches(), fx.coordinator.preload_count());
    assert_eq!(fx.cache.len(Variant::Thumbnail), 10);

    // Les éléments au-delà du préchargement restent chargeables à la demande
    let on_demand = fx
        .coordinator
        .ensure_loaded(&appended[15].id, Variant::Thumbnail, Some((200, 200)))
        .await;
    assert!(on_demand.is_some());
}

#[tokio::test]
async fn test_cache_survives_window_reset() {
    let fx = fixture(Duration::ZERO).await;

    fx.coordinator
        .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
        .await
        .unwrap();
    assert_eq!(fx.fetcher.fetches(), 1);

    // Reset puis ré-apparition du même identifiant dans la fenêtre
    fx.window.reset();
    fx.window.request_more().await.unwrap();
    assert_eq!(fx.window.get("asset-0000").unwrap().load_state, LoadState::Pending);

    // Le blob vient du cache, sans nouveau fetch
    let blob = fx
        .coordinator
        .ensure_loaded("asset-0000", Variant::Thumbnail, Some((200, 200)))
        .await;
    assert!(blob.is_some());
    assert_eq!(fx.fetcher.fetches(), 1);
    assert_eq!(
        fx.window.get("asset-0000").unwrap().load_state,
        LoadState::Loaded
    );
}
