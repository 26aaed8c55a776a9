//! Application state and router.

use crate::handlers::{cart, products};
use axum::routing::{get, post, put};
use axum::Router;
use oxcart_store::{CartService, CartStore, ProductStore, SharedDb};

/// Shared state for all handlers: the merge engine with its injected
/// store handles.
#[derive(Clone)]
pub struct AppState {
    pub service: CartService,
}

impl AppState {
    /// Wire the stores and service over one shared connection.
    pub fn new(db: SharedDb) -> Self {
        let products = ProductStore::new(db.clone());
        let carts = CartStore::new(db.clone());
        Self {
            service: CartService::new(db, products, carts),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products", post(products::create).get(products::list))
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        .route("/cart", post(cart::create))
        .route("/cart/{id}", get(cart::get))
        .route(
            "/cart/product",
            post(cart::add_product).delete(cart::remove_product),
        )
        .with_state(state)
}
