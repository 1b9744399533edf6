//! Repository Module
//!
//! Cache-coordinated access to products.

mod products;

#[cfg(test)]
mod property_tests;

pub use products::{CachePolicy, ProductRepository, DEFAULT_READ_TTL_SECS};
