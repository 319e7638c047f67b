use pglsource::{
    AssetSource, ImageFetcher, MemoryAssetSource, Variant, validate_page_request,
};

#[test]
fn test_validate_page_request_bounds() {
    assert!(validate_page_request(1).is_ok());
    assert!(validate_page_request(1000).is_ok());

    let err = validate_page_request(0).unwrap_err();
    assert_eq!(err.limit, 0);

    let err = validate_page_request(1001).unwrap_err();
    assert_eq!(err.limit, 1001);
    assert_eq!(err.max_limit, 1000);
}

#[tokio::test]
async fn test_memory_source_paging() {
    let source = MemoryAssetSource::with_generated(45);

    let page = source.fetch_page(0, 20).await.unwrap();
    assert_eq!(page.entries.len(), 20);
    assert_eq!(page.total_count, 45);

    // Dernière page partielle
    let page = source.fetch_page(40, 20).await.unwrap();
    assert_eq!(page.entries.len(), 5);
    assert_eq!(page.total_count, 45);
}

#[tokio::test]
async fn test_memory_source_stable_order() {
    let source = MemoryAssetSource::with_generated(30);

    // Deux fetches des mêmes offsets retournent les mêmes identifiants
    let first = source.fetch_page(10, 10).await.unwrap();
    let second = source.fetch_page(10, 10).await.unwrap();
    let ids =
        |page: &pglsource::AssetPage| page.entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));

    // Ordre par date de création décroissante
    let page = source.fetch_page(0, 30).await.unwrap();
    for pair in page.entries.windows(2) {
        assert!(pair[0].metadata.created_at >= pair[1].metadata.created_at);
    }
}

#[tokio::test]
async fn test_memory_source_offset_past_end() {
    let source = MemoryAssetSource::with_generated(5);

    // offset=10 avec totalCount=5 : page vide, pas d'erreur
    let page = source.fetch_page(10, 20).await.unwrap();
    assert!(page.entries.is_empty());
    assert_eq!(page.total_count, 5);
}

#[tokio::test]
async fn test_memory_source_rejects_invalid_limit() {
    let source = MemoryAssetSource::with_generated(5);

    assert!(source.fetch_page(0, 0).await.is_err());
    assert!(source.fetch_page(0, 1001).await.is_err());
    // Rien n'a été servi : la validation précède toute E/S
    assert_eq!(source.pages_fetched(), 0);
}

#[tokio::test]
async fn test_memory_source_image_fetch() {
    let source = MemoryAssetSource::with_generated(3);

    let full = source
        .fetch("asset-0001", Variant::Fullsize, None)
        .await
        .unwrap();
    assert!(!full.is_empty());

    let thumb = source
        .fetch("asset-0001", Variant::Thumbnail, Some((200, 200)))
        .await
        .unwrap();
    assert_ne!(full, thumb);

    let missing = source.fetch("no-such-asset", Variant::Thumbnail, None).await;
    assert!(matches!(missing, Err(pglsource::FetchError::NotFound)));
}
