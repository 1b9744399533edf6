//! Cache Module
//!
//! The `Cache` connector trait plus its Redis and in-memory implementations.
//! Values are opaque strings; the repository stores JSON in them.

mod entry;
mod memory;
mod redis_cache;


use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

// == Public Constants ==
/// Key holding the serialized listing of every product
pub const PRODUCTS_ALL_KEY: &str = "products:all";

/// Builds the per-product key, `product:<id>`
pub fn product_key(id: i64) -> String {
    format!("product:{}", id)
}

// == Cache Trait ==
/// Key-value cache connector shared by every request.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a value, replacing any previous one. `ttl_secs = None` means the
    /// entry never expires.
    async fn set(&self, key: &str, value: String, ttl_secs: Option<u64>)
        -> Result<(), CacheError>;

    /// Removes a key. Removing an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), CacheError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError>;
}
