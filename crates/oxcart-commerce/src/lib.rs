//! Cart and catalog domain types for Oxcart.
//!
//! This crate holds the rules that keep carts and products consistent:
//!
//! - **Catalog**: products with a title and an integer minor-unit price
//! - **Cart**: line items merged per product, insertion-ordered
//! - **Money**: integer arithmetic end to end, including presentation
//!
//! # Example
//!
//! ```rust
//! use oxcart_commerce::prelude::*;
//!
//! let product = Product {
//!     id: ProductId::new(1),
//!     title: "Fallout".to_string(),
//!     price: Money::new(199),
//! };
//!
//! let mut cart = Cart::empty(CartId::new(1));
//! cart.add_product(&product, 1).unwrap();
//! cart.add_product(&product, 1).unwrap();
//!
//! assert_eq!(cart.unique_item_count(), 1);
//! assert_eq!(cart.subtotal().unwrap().format_decimal(), "3.98");
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod page;

pub use cart::{Cart, LineItem};
pub use catalog::{NewProduct, Product, ProductPatch};
pub use error::CommerceError;
pub use ids::{CartId, LineItemId, ProductId};
pub use money::Money;
pub use page::{Page, Paginated, DEFAULT_PAGE_LIMIT};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem};
    pub use crate::catalog::{NewProduct, Product, ProductPatch};
    pub use crate::error::CommerceError;
    pub use crate::ids::{CartId, LineItemId, ProductId};
    pub use crate::money::Money;
    pub use crate::page::{Page, Paginated};
}
