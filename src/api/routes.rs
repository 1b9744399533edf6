//! API Routes
//!
//! Configures the Axum router with all product endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_product, delete_product, get_all_products, get_product, health_handler, update_product,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/getAllProducts", get(get_all_products))
        .route("/getProduct/:id", get(get_product))
        .route("/addProduct", post(add_product))
        .route("/updateProduct/:id", put(update_product))
        .route("/deleteProduct/:id", delete(delete_product))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
