//! API Handlers
//!
//! HTTP request handlers for each product endpoint.

use axum::{extract::State, http::StatusCode, Json};

use super::extract::{ApiJson, ApiPath};
use crate::error::{AppError, Result};
use crate::models::{HealthResponse, MessageResponse, Product, ProductRequest};
use crate::repository::ProductRepository;

/// Message returned whenever a product id has no row
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repository: ProductRepository,
}

impl AppState {
    pub fn new(repository: ProductRepository) -> Self {
        Self { repository }
    }
}

fn not_found() -> AppError {
    AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
}

/// Handler for GET /getAllProducts
pub async fn get_all_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.repository.list_all().await?;
    Ok(Json(products))
}

/// Handler for GET /getProduct/:id
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Product>> {
    state
        .repository
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Handler for POST /addProduct
pub async fn add_product(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = req.into_new_product().map_err(AppError::InvalidRequest)?;
    let created = state.repository.create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT /updateProduct/:id
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ProductRequest>,
) -> Result<Json<Product>> {
    let product = req.into_new_product().map_err(AppError::InvalidRequest)?;
    state
        .repository
        .update(id, product)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Handler for DELETE /deleteProduct/:id
///
/// 200 when a row was removed, 404 when there was nothing to remove.
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>> {
    match state.repository.delete(id).await? {
        0 => Err(not_found()),
        _ => Ok(Json(MessageResponse::new("Product deleted successfully"))),
    }
}

/// Handler for GET /health
///
/// Pings both connectors; 503 if either one fails.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.repository.store().ping().await.is_ok();
    let cache = state.repository.cache().ping().await.is_ok();

    let report = HealthResponse::from_pings(database, cache);
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
