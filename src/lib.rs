//! Product API - A product catalog service
//!
//! CRUD over a MySQL `PRODUCTS` table with a look-aside cache (Redis or
//! in-memory) in front of the reads.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
pub use repository::{CachePolicy, ProductRepository};
pub use tasks::spawn_cleanup_task;
