//! API Module
//!
//! HTTP handlers and routing for the product REST API.
//!
//! # Endpoints
//! - `GET /getAllProducts` - List every product
//! - `GET /getProduct/:id` - Fetch one product
//! - `POST /addProduct` - Create a product
//! - `PUT /updateProduct/:id` - Replace a product's fields
//! - `DELETE /deleteProduct/:id` - Delete a product
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiJson, ApiPath};
pub use handlers::*;
pub use routes::create_router;
