//! Product Repository
//!
//! Look-aside caching over the product table: reads try the cache first and
//! repopulate it on a miss, writes go to the store first and then refresh the
//! per-product cache entry.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{product_key, Cache, PRODUCTS_ALL_KEY};
use crate::error::{Result, StoreError};
use crate::models::{NewProduct, Product};
use crate::store::ProductStore;

/// Default TTL in seconds for entries cached on the read paths
pub const DEFAULT_READ_TTL_SECS: u64 = 3600;

// == Cache Policy ==
/// Expiry and invalidation choices applied by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// TTL for entries written by `list_all`, `get_by_id` and `prime_cache`
    pub read_ttl_secs: u64,
    /// TTL for per-product entries overwritten after create/update
    pub write_ttl_secs: Option<u64>,
    /// Delete the cached listing after every write
    pub invalidate_listing_on_write: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            read_ttl_secs: DEFAULT_READ_TTL_SECS,
            write_ttl_secs: None,
            invalidate_listing_on_write: false,
        }
    }
}

// == Product Repository ==
/// Coordinates the product store and the cache. Cloning shares both connectors.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn Cache>,
    policy: CachePolicy,
}

impl ProductRepository {
    // == Constructor ==
    pub fn new(store: Arc<dyn ProductStore>, cache: Arc<dyn Cache>) -> Self {
        Self::with_policy(store, cache, CachePolicy::default())
    }

    pub fn with_policy(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn Cache>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            policy,
        }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    // == List All ==
    /// Returns every product. A cached listing is returned as-is, without
    /// checking it against the store.
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        if let Some(cached) = self.cache.get(PRODUCTS_ALL_KEY).await? {
            debug!("Cache hit for {}", PRODUCTS_ALL_KEY);
            return Ok(serde_json::from_str(&cached)?);
        }

        debug!("Cache miss for {}", PRODUCTS_ALL_KEY);
        let products = self.store.fetch_all().await?;
        self.cache
            .set(
                PRODUCTS_ALL_KEY,
                serde_json::to_string(&products)?,
                Some(self.policy.read_ttl_secs),
            )
            .await?;

        Ok(products)
    }

    // == Get By Id ==
    /// Returns the product with this id, or `None` if no such row exists.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        let key = product_key(id);
        if let Some(cached) = self.cache.get(&key).await? {
            debug!("Cache hit for {}", key);
            return Ok(Some(serde_json::from_str(&cached)?));
        }

        debug!("Cache miss for {}", key);
        let Some(product) = self.store.fetch_by_id(id).await? else {
            return Ok(None);
        };

        self.cache
            .set(
                &key,
                serde_json::to_string(&product)?,
                Some(self.policy.read_ttl_secs),
            )
            .await?;

        Ok(Some(product))
    }

    // == Create ==
    /// Inserts a product and returns it with its assigned id.
    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        let id = self.store.insert(&product).await?;

        // A reissued id may still have an entry from an earlier row.
        let key = product_key(id);
        self.cache.del(&key).await?;
        let created = self.get_by_id(id).await?.ok_or(StoreError::Missing(id))?;

        self.cache
            .set(
                &key,
                serde_json::to_string(&created)?,
                self.policy.write_ttl_secs,
            )
            .await?;
        self.invalidate_listing().await?;

        info!("Created product {}", id);
        Ok(created)
    }

    // == Update ==
    /// Overwrites every field of the product with this id. Returns the fresh
    /// row, or `None` if it does not exist.
    ///
    /// The row is re-read from the store rather than through the cache, so a
    /// stale per-product entry can never be written back.
    pub async fn update(&self, id: i64, product: NewProduct) -> Result<Option<Product>> {
        self.store.update(id, &product).await?;

        let key = product_key(id);
        let Some(updated) = self.store.fetch_by_id(id).await? else {
            self.cache.del(&key).await?;
            return Ok(None);
        };

        self.cache
            .set(
                &key,
                serde_json::to_string(&updated)?,
                self.policy.write_ttl_secs,
            )
            .await?;
        self.invalidate_listing().await?;

        info!("Updated product {}", id);
        Ok(Some(updated))
    }

    // == Delete ==
    /// Deletes the product and its cache entry. Returns the number of rows
    /// removed, 0 or 1.
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let removed = self.store.delete(id).await?;
        self.cache.del(&product_key(id)).await?;
        if removed > 0 {
            self.invalidate_listing().await?;
            info!("Deleted product {}", id);
        }

        Ok(removed)
    }

    // == Prime Cache ==
    /// Loads the full listing and stores it under the listing key. Meant to
    /// run once at startup.
    pub async fn prime_cache(&self) -> Result<()> {
        let products = self.list_all().await?;
        self.cache
            .set(
                PRODUCTS_ALL_KEY,
                serde_json::to_string(&products)?,
                Some(self.policy.read_ttl_secs),
            )
            .await?;

        info!("Primed listing cache with {} products", products.len());
        Ok(())
    }

    async fn invalidate_listing(&self) -> Result<()> {
        if self.policy.invalidate_listing_on_write {
            self.cache.del(PRODUCTS_ALL_KEY).await?;
        }
        Ok(())
    }
}
