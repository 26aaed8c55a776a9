//! Product catalog handlers.

use crate::app::AppState;
use crate::error::ApiError;
use crate::payload::{CreateProductRequest, ListParams, ProductListResponse, UpdateProductRequest};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use oxcart_commerce::{Page, Product, ProductId, DEFAULT_PAGE_LIMIT};

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.service.products().create(body.into_new_product()?)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products?page=N`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let page = Page::number(params.page.unwrap_or(1), DEFAULT_PAGE_LIMIT);
    let listing = state.service.products().list(page)?;
    Ok(Json(ProductListResponse::from(listing)))
}

/// `PUT /products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .service
        .products()
        .update(ProductId::new(id), body.into_patch())?;
    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.products().delete(ProductId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
