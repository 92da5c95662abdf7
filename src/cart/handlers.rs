//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for reading a user's cart and for
//! the add, update and remove mutations.

use super::{models::*, state::SharedState};
use crate::error::Result;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/update", put(update_quantity))
        .route("/api/cart/remove", delete(remove_from_cart))
        .route("/api/cart/:user_id", get(get_cart))
}

/// Endpoint: GET /api/cart/:user_id
/// Returns the cart as parallel arrays; an unknown user gets an empty cart.
async fn get_cart(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Json<CartRecord> {
    Json(state.cart_record(&user_id))
}

/// Endpoint: POST /api/cart/add
///
/// Unparseable parameters (say `quantity=-1`) answer 400 with the usual
/// `{"error": ...}` body.
async fn add_to_cart(
    State(state): State<SharedState>,
    params: std::result::Result<Query<AddToCart>, QueryRejection>,
) -> Result<Json<CartRecord>> {
    let Query(params) = params?;
    state.add_to_cart(params).map(Json)
}

/// Endpoint: PUT /api/cart/update
async fn update_quantity(
    State(state): State<SharedState>,
    params: std::result::Result<Query<UpdateQuantity>, QueryRejection>,
) -> Result<Json<CartRecord>> {
    let Query(params) = params?;
    state
        .update_quantity(&params.user_id, &params.product_id, params.quantity)
        .map(Json)
}

/// Endpoint: DELETE /api/cart/remove
async fn remove_from_cart(
    State(state): State<SharedState>,
    params: std::result::Result<Query<RemoveFromCart>, QueryRejection>,
) -> Result<Json<CartRecord>> {
    let Query(params) = params?;
    state
        .remove_from_cart(&params.user_id, &params.product_id)
        .map(Json)
}
