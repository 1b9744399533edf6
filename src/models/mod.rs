//! Data models for the product service
//!
//! The `Product` entity plus the DTOs used for HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{NewProduct, Product};
pub use requests::ProductRequest;
pub use responses::{ErrorResponse, HealthResponse, MessageResponse};
