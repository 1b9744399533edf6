//! MySQL `ProductStore` over a sqlx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewProduct, Product};

use super::ProductStore;

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS PRODUCTS (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    price DOUBLE NOT NULL,
    description TEXT NOT NULL
)
"#;

/// Product table in MySQL. Holds a shared pool; clone freely.
#[derive(Debug, Clone)]
pub struct MySqlProductStore {
    pool: MySqlPool,
}

impl MySqlProductStore {
    /// Connects a pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .connect(database_url)
            .await?;

        info!("Connected to MySQL with a pool of {} connections", max_connections);
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates the `PRODUCTS` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MySqlProductStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description FROM PRODUCTS ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description FROM PRODUCTS WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, product: &NewProduct) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO PRODUCTS (name, price, description) VALUES (?, ?, ?)")
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .execute(&self.pool)
            .await?;

        i64::try_from(result.last_insert_id()).map_err(|_| {
            StoreError::Unavailable(format!(
                "generated id {} does not fit in i64",
                result.last_insert_id()
            ))
        })
    }

    async fn update(&self, id: i64, product: &NewProduct) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE PRODUCTS SET name = ?, price = ?, description = ? WHERE id = ?")
                .bind(&product.name)
                .bind(product.price)
                .bind(&product.description)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM PRODUCTS WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
