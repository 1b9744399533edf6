//! In-process `ProductStore` with auto-increment ids.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{NewProduct, Product};

use super::ProductStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// Product table held in memory. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, product: &NewProduct) -> Result<i64, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, Product::with_id(id, product.clone()));
        Ok(id)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = Product::with_id(id, product.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct::new("Widget", 9.99, "A widget")
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryProductStore::new();

        let first = store.insert(&widget()).await.unwrap();
        let second = store.insert(&widget()).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryProductStore::new();

        let id = store.insert(&widget()).await.unwrap();
        assert_eq!(store.delete(id).await.unwrap(), 1);
        let next = store.insert(&widget()).await.unwrap();

        assert!(next > id);
    }

    #[tokio::test]
    async fn test_update_missing_row_affects_nothing() {
        let store = MemoryProductStore::new();

        assert_eq!(store.update(99, &widget()).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let store = MemoryProductStore::new();
        let id = store.insert(&widget()).await.unwrap();

        let changed = NewProduct::new("Gizmo", 1.5, "Smaller");
        assert_eq!(store.update(id, &changed).await.unwrap(), 1);

        let row = store.fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(row, Product::with_id(id, changed));
    }

    #[tokio::test]
    async fn test_fetch_all_is_ordered_by_id() {
        let store = MemoryProductStore::new();
        for name in ["c", "a", "b"] {
            store.insert(&NewProduct::new(name, 1.0, "")).await.unwrap();
        }

        let ids: Vec<i64> = store.fetch_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_twice_returns_zero() {
        let store = MemoryProductStore::new();
        let id = store.insert(&widget()).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
    }
}
