//! Bounded cache of thumbnail URLs keyed by resource id.
//!
//! Grid and map views resolve thumbnails for every visible resource on each
//! render. The cache keeps the most recently used URLs and evicts the least
//! recently used ones once it is full.

use crate::config::ThumbnailConfig;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
struct Entry {
    url: String,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: FxHashMap<String, Entry>,
    /// Last-use tick to resource id, oldest first
    recency: BTreeMap<u64, String>,
    clock: u64,
    stats: ThumbnailStats,
}

impl Inner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn insert(&mut self, id: String, url: String) {
        let last_used = self.tick();
        if let Some(previous) = self.entries.insert(id.clone(), Entry { url, last_used }) {
            self.recency.remove(&previous.last_used);
        }
        self.recency.insert(last_used, id);
    }

    /// Mark `id` as just used and return its URL.
    fn touch(&mut self, id: &str) -> Option<String> {
        let now = self.tick();
        let entry = self.entries.get_mut(id)?;
        let previous = std::mem::replace(&mut entry.last_used, now);
        let url = entry.url.clone();
        if let Some(key) = self.recency.remove(&previous) {
            self.recency.insert(now, key);
        }
        Some(url)
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.entries.remove(id) {
            Some(entry) => {
                self.recency.remove(&entry.last_used);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn evict_to(&mut self, capacity: usize) {
        while self.entries.len() > capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
            log::debug!("Evicted thumbnail for resource {}", oldest);
        }
    }
}

/// Thread-safe LRU cache of thumbnail URLs.
///
/// # Examples
///
/// ```rust
/// use mediamap::ThumbnailCache;
///
/// let cache = ThumbnailCache::with_capacity(2, "/images/no-thumbnail.png");
/// cache.preload([("a", "blob:a"), ("b", "blob:b")]);
///
/// assert_eq!(cache.get("a"), "blob:a");
/// assert_eq!(cache.get("missing"), "/images/no-thumbnail.png");
///
/// // "b" is now the least recently used entry
/// cache.preload([("c", "blob:c")]);
/// assert!(cache.peek("b").is_none());
/// ```
#[derive(Debug)]
pub struct ThumbnailCache {
    capacity: usize,
    placeholder: String,
    inner: Mutex<Inner>,
}

impl ThumbnailCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize, placeholder: impl Into<String>) -> Self {
        Self {
            capacity: capacity.max(1),
            placeholder: placeholder.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn from_config(config: &ThumbnailConfig) -> Self {
        Self::with_capacity(config.capacity, config.placeholder_url.clone())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Merge URLs into the cache; existing ids are overwritten.
    pub fn preload<I, K, V>(&self, thumbnails: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut inner = self.inner.lock();
        for (id, url) in thumbnails {
            inner.insert(id.into(), url.into());
        }
        inner.evict_to(self.capacity);
    }

    /// URL for `resource_id`, or the placeholder when none is cached.
    pub fn get(&self, resource_id: &str) -> String {
        let mut inner = self.inner.lock();
        match inner.touch(resource_id) {
            Some(url) => {
                inner.stats.hits += 1;
                url
            }
            None => {
                inner.stats.misses += 1;
                self.placeholder.clone()
            }
        }
    }

    /// Cached URL without affecting recency or counters.
    pub fn peek(&self, resource_id: &str) -> Option<String> {
        self.inner
            .lock()
            .entries
            .get(resource_id)
            .map(|entry| entry.url.clone())
    }

    /// Drop the entry for `resource_id`, e.g. after its thumbnail was edited.
    pub fn invalidate(&self, resource_id: &str) -> bool {
        self.inner.lock().remove(resource_id)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> ThumbnailStats {
        self.inner.lock().stats
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::from_config(&ThumbnailConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_placeholder_for_missing() {
        let cache = ThumbnailCache::default();
        assert_eq!(cache.get("nope"), "/images/no-thumbnail.png");
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_preload_merges_and_overwrites() {
        let cache = ThumbnailCache::with_capacity(10, "none");
        cache.preload([("a", "1"), ("b", "2")]);
        cache.preload([("b", "3"), ("c", "4")]);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), "1");
        assert_eq!(cache.get("b"), "3");
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ThumbnailCache::with_capacity(2, "none");
        cache.preload([("a", "1"), ("b", "2")]);
        cache.get("a");
        cache.preload([("c", "3")]);

        assert_eq!(cache.peek("a").as_deref(), Some("1"));
        assert!(cache.peek("b").is_none());
        assert_eq!(cache.peek("c").as_deref(), Some("3"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_refreshes_recency() {
        let cache = ThumbnailCache::with_capacity(2, "none");
        cache.preload([("a", "1"), ("b", "2")]);
        cache.preload([("a", "1b")]);
        cache.preload([("c", "3")]);

        assert_eq!(cache.peek("a").as_deref(), Some("1b"));
        assert!(cache.peek("b").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_recency_index_tracks_entries() {
        let cache = ThumbnailCache::with_capacity(8, "none");
        for round in 0..5 {
            cache.preload((0..12).map(|i| (format!("r{}", (i * 7 + round) % 15), format!("u{}", i))));
            for i in 0..15 {
                cache.get(&format!("r{}", i));
            }
            cache.invalidate(&format!("r{}", round));
        }

        let inner = cache.inner.lock();
        assert_eq!(inner.recency.len(), inner.entries.len());
        for (tick, id) in &inner.recency {
            assert_eq!(inner.entries[id].last_used, *tick);
        }
    }

    #[test]
    fn test_eviction_follows_use_order() {
        let cache = ThumbnailCache::with_capacity(3, "none");
        cache.preload([("a", "1"), ("b", "2"), ("c", "3")]);
        cache.get("b");
        cache.get("a");
        cache.preload([("d", "4"), ("e", "5")]);

        assert!(cache.peek("c").is_none());
        assert!(cache.peek("b").is_none());
        assert!(cache.peek("a").is_some());
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn test_oversized_preload_keeps_latest() {
        let cache = ThumbnailCache::with_capacity(2, "none");
        cache.preload((0..5).map(|i| (format!("r{}", i), format!("u{}", i))));
        assert_eq!(cache.len(), 2);
        assert!(cache.peek("r3").is_some());
        assert!(cache.peek("r4").is_some());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ThumbnailCache::with_capacity(4, "none");
        cache.preload([("a", "1"), ("b", "2")]);

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.get("a"), "none");

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = ThumbnailCache::with_capacity(0, "none");
        assert_eq!(cache.capacity(), 1);
        cache.preload([("a", "1")]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = ThumbnailConfig {
            capacity: 3,
            placeholder_url: "/blank.png".to_string(),
        };
        let cache = ThumbnailCache::from_config(&config);
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.placeholder(), "/blank.png");
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ThumbnailCache::with_capacity(64, "none"));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let id = format!("t{}-{}", t, i % 10);
                        cache.preload([(id.clone(), format!("url-{}", i))]);
                        assert_ne!(cache.get(&id), "none");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 40);
    }
}
