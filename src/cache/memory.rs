//! In-Memory Cache Module
//!
//! A process-local `Cache` backed by a HashMap with per-entry TTL. Used when no
//! Redis is configured and as the cache in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{Cache, CacheEntry};
use crate::error::CacheError;

// == Memory Cache ==
/// Shared in-memory cache. Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Entry ==
    /// Returns a copy of the live entry for `key`, including its expiry.
    pub async fn entry(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).filter(|e| !e.is_expired()).cloned()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.write().await;
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_secs: Option<u64>,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(value, ttl_secs));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_memory_cache_new() {
        let cache = MemoryCache::new();
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();

        cache.set("key1", "value1".to_string(), None).await.unwrap();

        assert_eq!(cache.get("key1").await.unwrap().as_deref(), Some("value1"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let cache = MemoryCache::new();
        assert!(cache.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value_and_ttl() {
        let cache = MemoryCache::new();

        cache.set("key1", "value1".to_string(), Some(60)).await.unwrap();
        cache.set("key1", "value2".to_string(), None).await.unwrap();

        let entry = cache.entry("key1").await.unwrap();
        assert_eq!(entry.value, "value2");
        assert!(entry.expires_at.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_del_is_idempotent() {
        let cache = MemoryCache::new();

        cache.set("key1", "value1".to_string(), None).await.unwrap();
        cache.del("key1").await.unwrap();
        cache.del("key1").await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new();

        cache.set("key1", "value1".to_string(), Some(1)).await.unwrap();
        assert!(cache.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(cache.get("key1").await.unwrap().is_none());
        assert!(cache.is_empty().await, "Expired entry should be dropped on read");
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let cache = MemoryCache::new();

        cache.set("key1", "value1".to_string(), Some(1)).await.unwrap();
        cache.set("key2", "value2".to_string(), Some(10)).await.unwrap();
        cache.set("key3", "value3".to_string(), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(cache.cleanup_expired().await, 1);
        assert_eq!(cache.len().await, 2);
        assert!(cache.get("key2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = MemoryCache::new();
        let handle = cache.clone();

        handle.set("shared", "yes".to_string(), None).await.unwrap();

        assert_eq!(cache.get("shared").await.unwrap().as_deref(), Some("yes"));
    }
}
