/*!
 * Tests for the segment translation cache
 */

use chunkwise::translation::TranslationCache;

/// Test that a disabled cache stores nothing
#[test]
fn test_disabled_cache_shouldNeverHit() {
    let cache = TranslationCache::default();
    cache.store("Hello.", "en", "hi", "नमस्ते।");

    assert!(!cache.is_enabled());
    assert!(cache.get("Hello.", "en", "hi").is_none());
    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits + cache.stats().misses, 0);
}

/// Test that entries are keyed by language pair
#[test]
fn test_enabled_cache_shouldKeyByLanguagePair() {
    let cache = TranslationCache::new(true);
    cache.store("Hello.", "en", "hi", "नमस्ते।");

    assert_eq!(cache.get("Hello.", "EN", "HI").as_deref(), Some("नमस्ते।"));
    assert!(cache.get("Hello.", "en", "gu").is_none());
    assert_eq!(cache.len(), 1);

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}

/// Test that clones share entries and clear resets everything
#[test]
fn test_cloned_cache_shouldShareEntries() {
    let cache = TranslationCache::new(true);
    let clone = cache.clone();
    clone.store("Bye.", "Autodetect", "hi", "अलविदा।");

    assert!(cache.get("Bye.", "Autodetect", "hi").is_some());

    cache.clear();
    assert!(clone.is_empty());
    assert_eq!(clone.stats().hits, 0);
}
