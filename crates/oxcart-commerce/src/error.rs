//! Commerce error types.

use crate::ids::{CartId, ProductId};
use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Cart not found.
    #[error("Cart not found: {0}")]
    CartNotFound(CartId),

    /// The cart has no line item for the given product.
    #[error("Product {product_id} is not in cart {cart_id}")]
    LineItemNotFound {
        cart_id: CartId,
        product_id: ProductId,
    },

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A second line item for the same (cart, product) pair reached the
    /// store. The merge rules make this unreachable; the storage
    /// uniqueness constraint reports it if anything slips through.
    #[error("Duplicate line item for product {product_id} in cart {cart_id}")]
    DuplicateLineItem {
        cart_id: CartId,
        product_id: ProductId,
    },

    /// Product is referenced by at least one cart line item.
    #[error("Product {0} is referenced by a cart and cannot be deleted")]
    ProductInUse(ProductId),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CommerceError {
    /// Validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        CommerceError::Validation(msg.into())
    }
}

impl From<oxcart_db::DbError> for CommerceError {
    fn from(e: oxcart_db::DbError) -> Self {
        CommerceError::Database(e.to_string())
    }
}
