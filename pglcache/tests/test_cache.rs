use bytes::Bytes;
use pglcache::{cache_key, ContentCache};
use pglsource::Variant;

fn blob(text: &str) -> Bytes {
    Bytes::from(text.to_string())
}

#[test]
fn test_round_trip() {
    let cache = ContentCache::new();
    let key = cache_key("asset-1", Variant::Thumbnail, Some((200, 200)));

    cache.put(Variant::Thumbnail, key.clone(), blob("thumb-1"), 7);

    // Le blob revient à l'identique tant qu'il n'est pas évincé
    assert_eq!(cache.get(Variant::Thumbnail, &key).unwrap(), blob("thumb-1"));
    assert_eq!(cache.len(Variant::Thumbnail), 1);
    assert_eq!(cache.total_cost(Variant::Thumbnail), 7);
}

#[test]
fn test_miss_has_no_side_effect() {
    let cache = ContentCache::new();
    assert!(cache.get(Variant::Thumbnail, "missing").is_none());
    assert_eq!(cache.len(Variant::Thumbnail), 0);
}

#[test]
fn test_partitions_are_independent() {
    let cache = ContentCache::with_limits(2, 2);
    let key = cache_key("asset-1", Variant::Thumbnail, None);

    cache.put(Variant::Thumbnail, key.clone(), blob("thumb"), 1);

    // Même clé, autre partition : miss
    assert!(cache.get(Variant::Fullsize, &key).is_none());

    // L'éviction des vignettes ne touche pas les images complètes
    cache.put(Variant::Fullsize, "full".into(), blob("full"), 1);
    for i in 0..5 {
        cache.put(Variant::Thumbnail, format!("k{i}"), blob("x"), 1);
    }
    assert_eq!(cache.len(Variant::Thumbnail), 2);
    assert_eq!(cache.len(Variant::Fullsize), 1);
}

#[test]
fn test_lru_eviction_count_limit() {
    let cache = ContentCache::with_limits(3, 10);

    // capacité + 1 clés distinctes : il en reste exactement `capacité`
    for i in 0..4 {
        cache.put(Variant::Thumbnail, format!("k{i}"), blob("x"), 1);
    }
    assert_eq!(cache.len(Variant::Thumbnail), 3);

    // k0 est la moins récemment utilisée : c'est elle qui est partie
    assert!(cache.get(Variant::Thumbnail, "k0").is_none());
    assert!(cache.get(Variant::Thumbnail, "k1").is_some());
    assert!(cache.get(Variant::Thumbnail, "k3").is_some());
}

#[test]
fn test_get_refreshes_recency() {
    let cache = ContentCache::with_limits(2, 10);

    cache.put(Variant::Thumbnail, "a".into(), blob("a"), 1);
    cache.put(Variant::Thumbnail, "b".into(), blob("b"), 1);

    // Toucher `a` la rend plus récente que `b`
    assert!(cache.get(Variant::Thumbnail, "a").is_some());

    cache.put(Variant::Thumbnail, "c".into(), blob("c"), 1);
    assert!(cache.get(Variant::Thumbnail, "b").is_none());
    assert!(cache.get(Variant::Thumbnail, "a").is_some());
    assert!(cache.get(Variant::Thumbnail, "c").is_some());
}

#[test]
fn test_put_same_key_replaces_cost() {
    let cache = ContentCache::new();

    cache.put(Variant::Thumbnail, "k".into(), blob("v1"), 10);
    cache.put(Variant::Thumbnail, "k".into(), blob("v2"), 4);

    assert_eq!(cache.len(Variant::Thumbnail), 1);
    assert_eq!(cache.total_cost(Variant::Thumbnail), 4);
    assert_eq!(cache.get(Variant::Thumbnail, "k").unwrap(), blob("v2"));
}

#[test]
fn test_cost_limit_evicts_before_count_limit() {
    let cache = ContentCache::with_limits(100, 100);
    cache.set_cost_limit(Variant::Thumbnail, Some(10));

    // Trois entrées de coût 4 : 12 > 10, la plus ancienne saute
    cache.put(Variant::Thumbnail, "a".into(), blob("a"), 4);
    cache.put(Variant::Thumbnail, "b".into(), blob("b"), 4);
    cache.put(Variant::Thumbnail, "c".into(), blob("c"), 4);

    assert_eq!(cache.len(Variant::Thumbnail), 2);
    assert!(cache.get(Variant::Thumbnail, "a").is_none());
    assert!(cache.total_cost(Variant::Thumbnail) <= 10);
}

#[test]
fn test_configure_shrinks_immediately() {
    let cache = ContentCache::with_limits(5, 5);
    for i in 0..5 {
        cache.put(Variant::Thumbnail, format!("k{i}"), blob("x"), 1);
    }

    cache.configure(Some(2), None);

    // Éviction immédiate, LRU d'abord
    assert_eq!(cache.len(Variant::Thumbnail), 2);
    assert!(cache.get(Variant::Thumbnail, "k3").is_some());
    assert!(cache.get(Variant::Thumbnail, "k4").is_some());
}

#[test]
fn test_zero_capacity_disables_partition() {
    let cache = ContentCache::with_limits(0, 5);

    cache.put(Variant::Thumbnail, "k".into(), blob("x"), 1);
    assert!(cache.get(Variant::Thumbnail, "k").is_none());
    assert_eq!(cache.len(Variant::Thumbnail), 0);

    // Reconfigurer à zéro vide une partition active
    cache.put(Variant::Fullsize, "f".into(), blob("x"), 1);
    cache.configure(None, Some(0));
    assert_eq!(cache.len(Variant::Fullsize), 0);
    cache.put(Variant::Fullsize, "f".into(), blob("x"), 1);
    assert!(cache.get(Variant::Fullsize, "f").is_none());
}

#[test]
fn test_clear_single_partition() {
    let cache = ContentCache::new();
    cache.put(Variant::Thumbnail, "t".into(), blob("t"), 1);
    cache.put(Variant::Fullsize, "f".into(), blob("f"), 1);

    cache.clear(Some(Variant::Thumbnail));
    assert_eq!(cache.len(Variant::Thumbnail), 0);
    assert_eq!(cache.len(Variant::Fullsize), 1);

    cache.clear(None);
    assert_eq!(cache.len(Variant::Fullsize), 0);
    assert_eq!(cache.total_cost(Variant::Fullsize), 0);
}
