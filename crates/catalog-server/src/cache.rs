//! Look-aside cache with TTL support
//!
//! Key/value store of serialized snapshots, keyed by logical resource
//! identifiers. Never the source of truth: an entry is either unexpired
//! (possibly stale within its TTL window) or logically absent. Callers
//! cannot distinguish "never written" from "expired" from "evicted".

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct CacheLayer {
    data: Arc<DashMap<String, CacheEntry>>,
}

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl CacheLayer {
    pub fn new() -> Self {
        let cache = Self {
            data: Arc::new(DashMap::new()),
        };

        cache.start_cleanup_task();

        cache
    }

    /// Get a value if present and unexpired.
    ///
    /// Expired entries are dropped lazily here; the cleanup task handles
    /// the ones nobody asks for again.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).and_then(|entry| {
            if Instant::now() > entry.expires_at {
                drop(entry);
                self.data.remove(key);
                return None;
            }
            Some(entry.value.clone())
        })
    }

    /// Store a value with absolute expiry `now + ttl`, overwriting any
    /// existing entry under `key`.
    pub fn set(&self, key: String, value: Vec<u8>, ttl: Duration) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Remove all listed keys. Deleting an absent key is not an error.
    pub fn delete(&self, keys: &[String]) {
        for key in keys {
            self.data.remove(key);
        }
    }

    fn start_cleanup_task(&self) {
        let data = self.data.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;

                let now = Instant::now();
                let expired: Vec<String> = data
                    .iter()
                    .filter(|entry| now > entry.expires_at)
                    .map(|entry| entry.key().clone())
                    .collect();

                for key in expired {
                    data.remove(&key);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let cache = CacheLayer::new();

        cache.set("key1".to_string(), vec![1, 2, 3], Duration::from_secs(60));
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        assert_eq!(cache.get("nonexistent"), None);

        cache.delete(&["key1".to_string()]);
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn expired_entry_reads_as_absent() {
        let cache = CacheLayer::new();

        cache.set(
            "key1".to_string(),
            vec![1, 2, 3],
            Duration::from_millis(10),
        );
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let cache = CacheLayer::new();

        cache.set("key1".to_string(), vec![1], Duration::from_secs(60));
        cache.set("key1".to_string(), vec![2], Duration::from_secs(60));
        assert_eq!(cache.get("key1"), Some(vec![2]));
    }

    #[tokio::test]
    async fn deleting_absent_keys_is_a_no_op() {
        let cache = CacheLayer::new();

        cache.set("keep".to_string(), vec![1], Duration::from_secs(60));
        cache.delete(&["missing".to_string(), "keep".to_string()]);
        assert_eq!(cache.get("keep"), None);
        assert_eq!(cache.get("missing"), None);
    }
}
