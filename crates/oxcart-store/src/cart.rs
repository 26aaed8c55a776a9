//! Durable cart records.

use crate::{lock, scalar_i64, SharedDb};
use oxcart_commerce::{Cart, CartId, CommerceError, LineItem, LineItemId, Money, ProductId};
use oxcart_db::{params, Db};
use serde::Deserialize;

/// Store handle for cart records and their line items.
#[derive(Clone)]
pub struct CartStore {
    db: SharedDb,
}

/// One eagerly-joined line-item row.
#[derive(Debug, Deserialize)]
struct LineItemRow {
    id: i64,
    product_id: i64,
    title: String,
    price: i64,
    quantity: i64,
}

impl CartStore {
    /// Create a store over a shared connection.
    pub fn new(db: SharedDb) -> Self {
        Self { db }
    }

    /// Create an empty cart. Always succeeds.
    pub fn create(&self) -> Result<Cart, CommerceError> {
        let db = lock(&self.db)?;
        db.execute("INSERT INTO cart DEFAULT VALUES", &[])?;
        let id = CartId::new(db.last_insert_id());
        tracing::info!(cart_id = %id, "cart created");
        Ok(Cart::empty(id))
    }

    /// Get a cart record by id. Line items are not loaded; use
    /// [`CartStore::get_with_items`] for the full aggregate.
    pub fn get(&self, id: CartId) -> Result<Cart, CommerceError> {
        let db = lock(&self.db)?;
        Self::ensure_exists(&db, id)?;
        Ok(Cart::empty(id))
    }

    /// Get a cart with its line items eagerly resolved.
    ///
    /// One join query materializes the whole aggregate, in insertion
    /// order; no per-item lookups happen afterwards.
    pub fn get_with_items(&self, id: CartId) -> Result<Cart, CommerceError> {
        let db = lock(&self.db)?;
        Self::load_with_items(&db, id)
    }

    /// Load the full aggregate within an already-locked connection.
    pub(crate) fn load_with_items(db: &Db, id: CartId) -> Result<Cart, CommerceError> {
        Self::ensure_exists(db, id)?;
        let rows: Vec<LineItemRow> = db.query_as(
            "SELECT cp.id AS id, cp.product_id AS product_id, \
                    p.title AS title, p.price AS price, cp.quantity AS quantity \
             FROM cart_products cp \
             INNER JOIN product p ON p.id = cp.product_id \
             WHERE cp.cart_id = ? \
             ORDER BY cp.id ASC",
            params![id.get()],
        )?;
        let items = rows
            .into_iter()
            .map(|r| LineItem {
                id: Some(LineItemId::new(r.id)),
                product_id: ProductId::new(r.product_id),
                title: r.title,
                unit_price: Money::new(r.price),
                quantity: r.quantity,
            })
            .collect();
        Ok(Cart { id, items })
    }

    /// Verify a cart id resolves to a record.
    pub(crate) fn ensure_exists(db: &Db, id: CartId) -> Result<(), CommerceError> {
        let found = scalar_i64(db, "SELECT COUNT(*) FROM cart WHERE id = ?", params![id.get()])?;
        if found == 0 {
            return Err(CommerceError::CartNotFound(id));
        }
        Ok(())
    }
}
