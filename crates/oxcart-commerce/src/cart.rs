//! Cart aggregate and line items.
//!
//! A cart owns an insertion-ordered collection of line items, at most one
//! per product. Adding a product that is already in the cart merges into
//! the existing line item instead of creating a duplicate.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item: exactly one product with a quantity within one cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Store-assigned identifier; `None` until the item is persisted.
    pub id: Option<LineItemId>,
    /// The referenced product.
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price at load time; the product row stays authoritative.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl LineItem {
    /// Total for this line (unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart with the given identity.
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    /// Add a product to the cart, merging with an existing line item.
    ///
    /// If the product is already in the cart, its quantity is increased
    /// by `quantity`; otherwise a new line item is appended. Returns the
    /// affected line item.
    ///
    /// Fails with a validation error if `quantity` is not positive (the
    /// request is rejected before any merge happens) and with `Overflow`
    /// if the merged quantity would not fit in an i64.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<&LineItem, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::validation(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }

        let pos = match self.items.iter().position(|i| i.product_id == product.id) {
            Some(pos) => {
                let item = &mut self.items[pos];
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
                pos
            }
            None => {
                self.items.push(LineItem {
                    id: None,
                    product_id: product.id,
                    title: product.title.clone(),
                    unit_price: product.price,
                    quantity,
                });
                self.items.len() - 1
            }
        };
        Ok(&self.items[pos])
    }

    /// Remove the line item for a product, returning it.
    ///
    /// Removing a product that is not in the cart is an error, not a
    /// crash: it reports `LineItemNotFound`.
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<LineItem, CommerceError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or(CommerceError::LineItemNotFound {
                cart_id: self.id,
                product_id,
            })?;
        Ok(self.items.remove(pos))
    }

    /// Get the line item for a product, if present.
    pub fn line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Check if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals in minor units.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| {
                acc.try_add(&item.line_total()?).ok_or(CommerceError::Overflow)
            })
    }
}
