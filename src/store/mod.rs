//! Store Module
//!
//! The `ProductStore` persistence connector and its implementations. The
//! relational table is the single source of truth for products.

mod memory;
mod mysql;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewProduct, Product};

pub use memory::MemoryProductStore;
pub use mysql::MySqlProductStore;

// == Product Store Trait ==
/// Parameterized access to the `PRODUCTS` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every row, ordered by id.
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError>;

    /// The row with this id, if any.
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Inserts a row and returns the id the store assigned to it.
    async fn insert(&self, product: &NewProduct) -> Result<i64, StoreError>;

    /// Overwrites every non-id column of the row. Returns affected rows.
    async fn update(&self, id: i64, product: &NewProduct) -> Result<u64, StoreError>;

    /// Deletes the row. Returns affected rows (0 or 1).
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
