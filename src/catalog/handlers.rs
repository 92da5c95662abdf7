//! REST API handlers for the product catalog
//!
//! Browsing endpoints used by the storefront pages plus the admin CRUD
//! endpoints.

use super::models::{Product, ProductInput, ProductQuery};
use crate::cart::state::SharedState;
use crate::error::{Result, StorefrontError};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Endpoint: GET /api/products
async fn list_products(
    State(state): State<SharedState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(query) = query?;
    Ok(Json(state.catalog.list(&query)))
}

/// Endpoint: GET /api/products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog
        .get(&id)
        .map(Json)
        .ok_or(StorefrontError::ProductNotFound(id))
}

/// Endpoint: POST /api/products
async fn create_product(
    State(state): State<SharedState>,
    input: std::result::Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(input) = input?;
    let product = state.catalog.create(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Endpoint: PUT /api/products/:id
async fn update_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    input: std::result::Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>> {
    let Json(input) = input?;
    state.catalog.update(&id, input).map(Json)
}

/// Endpoint: DELETE /api/products/:id
async fn delete_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.catalog.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
