//! The line-item merge engine.
//!
//! `CartService` owns the rule that a (cart, product) pair maps to at
//! most one line item. Each mutation runs its whole read-merge-write (or
//! read-delete) sequence inside one immediate transaction, so two
//! requests racing on the same cart serialize at the store instead of
//! losing an update.

use crate::cart::CartStore;
use crate::product::ProductStore;
use crate::{lock, SharedDb};
use oxcart_commerce::{Cart, CartId, CommerceError, LineItemId, Money, ProductId};
use oxcart_db::params;
use serde::{Deserialize, Serialize};

/// A fully materialized cart for presentation: line items with product
/// details, plus the subtotal in raw minor units and formatted for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartView {
    /// Cart identifier.
    pub id: CartId,
    /// Line items in insertion order.
    pub items: Vec<LineItemView>,
    /// Sum of line totals, minor units.
    pub subtotal: Money,
    /// Subtotal as a two-fraction-digit decimal string.
    pub subtotal_formatted: String,
}

/// One line of a [`CartView`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemView {
    /// Line item identifier.
    pub id: LineItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price, minor units.
    pub price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Unit price x quantity, minor units.
    pub line_total: Money,
}

impl CartView {
    /// Build a view from a loaded cart aggregate.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        let items = cart
            .items
            .iter()
            .map(|item| {
                let id = item.id.ok_or_else(|| {
                    CommerceError::Database("line item loaded without an id".to_string())
                })?;
                Ok(LineItemView {
                    id,
                    product_id: item.product_id,
                    title: item.title.clone(),
                    price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;
        let subtotal = cart.subtotal()?;
        Ok(Self {
            id: cart.id,
            items,
            subtotal,
            subtotal_formatted: subtotal.format_decimal(),
        })
    }
}

/// The merge engine. Holds explicitly injected store handles over one
/// shared connection.
#[derive(Clone)]
pub struct CartService {
    db: SharedDb,
    products: ProductStore,
    carts: CartStore,
}

impl CartService {
    /// Create the service from its store handles.
    pub fn new(db: SharedDb, products: ProductStore, carts: CartStore) -> Self {
        Self {
            db,
            products,
            carts,
        }
    }

    /// Product store handle.
    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    /// Cart store handle.
    pub fn carts(&self) -> &CartStore {
        &self.carts
    }

    /// Add a product to a cart, merging with an existing line item.
    ///
    /// Resolves the cart and the product (each missing id is its own
    /// not-found error), merges or inserts the line item, and persists,
    /// all inside one transaction. Returns the resulting cart view.
    pub fn add_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        let db = lock(&self.db)?;
        let view = db.with_transaction(|db| {
            let mut cart = CartStore::load_with_items(db, cart_id)?;
            let product = ProductStore::fetch(db, product_id)?;

            let merged = cart.add_product(&product, quantity)?;
            let (line_id, new_quantity) = (merged.id, merged.quantity);

            match line_id {
                Some(line_id) => {
                    db.execute(
                        "UPDATE cart_products SET quantity = ? WHERE id = ?",
                        params![new_quantity, line_id.get()],
                    )?;
                }
                None => {
                    db.execute(
                        "INSERT INTO cart_products (cart_id, product_id, quantity) \
                         VALUES (?, ?, ?)",
                        params![cart_id.get(), product_id.get(), new_quantity],
                    )
                    .map_err(|e| {
                        if e.is_constraint() {
                            CommerceError::DuplicateLineItem {
                                cart_id,
                                product_id,
                            }
                        } else {
                            CommerceError::from(e)
                        }
                    })?;
                }
            }

            let cart = CartStore::load_with_items(db, cart_id)?;
            CartView::from_cart(&cart)
        })?;
        tracing::info!(
            cart_id = %cart_id,
            product_id = %product_id,
            quantity,
            "product added to cart"
        );
        Ok(view)
    }

    /// Remove a product's line item from a cart.
    ///
    /// The cart and product are resolved first; a product that exists
    /// but is not in the cart reports a line-item not-found error.
    pub fn remove_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<(), CommerceError> {
        let db = lock(&self.db)?;
        db.with_transaction(|db| {
            let mut cart = CartStore::load_with_items(db, cart_id)?;
            ProductStore::fetch(db, product_id)?;

            let removed = cart.remove_product(product_id)?;
            if let Some(line_id) = removed.id {
                db.execute(
                    "DELETE FROM cart_products WHERE id = ?",
                    params![line_id.get()],
                )?;
            }
            Ok::<_, CommerceError>(())
        })?;
        tracing::info!(cart_id = %cart_id, product_id = %product_id, "product removed from cart");
        Ok(())
    }

    /// Materialize a cart with line details and totals.
    pub fn cart_view(&self, cart_id: CartId) -> Result<CartView, CommerceError> {
        let db = lock(&self.db)?;
        let cart = CartStore::load_with_items(&db, cart_id)?;
        CartView::from_cart(&cart)
    }
}
