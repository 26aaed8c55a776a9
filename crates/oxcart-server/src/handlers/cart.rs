//! Cart and cart-product handlers.

use crate::app::AppState;
use crate::error::ApiError;
use crate::payload::CartProductRequest;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use oxcart_commerce::CartId;
use oxcart_store::CartView;

/// `POST /cart`
pub async fn create(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CartView>), ApiError> {
    let cart = state.service.carts().create()?;
    Ok((StatusCode::CREATED, Json(CartView::from_cart(&cart)?)))
}

/// `GET /cart/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CartView>, ApiError> {
    Ok(Json(state.service.cart_view(CartId::new(id))?))
}

/// `POST /cart/product`
pub async fn add_product(
    State(state): State<AppState>,
    Json(body): Json<CartProductRequest>,
) -> Result<(StatusCode, Json<CartView>), ApiError> {
    let view = state
        .service
        .add_product(body.cart_id()?, body.product_id()?, body.quantity())?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `DELETE /cart/product`
pub async fn remove_product(
    State(state): State<AppState>,
    Json(body): Json<CartProductRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .remove_product(body.cart_id()?, body.product_id()?)?;
    Ok(StatusCode::NO_CONTENT)
}
