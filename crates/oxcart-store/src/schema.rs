//! Storage schema bootstrap.
//!
//! Three tables: `product`, `cart`, and the `cart_products` join table.
//! The `UNIQUE (cart_id, product_id)` constraint backs the at-most-one-
//! line-item-per-product rule at the storage layer; `ON DELETE CASCADE`
//! ties line items to their owning cart, while product references are
//! RESTRICT so a referenced product cannot be deleted out from under a
//! cart.

use crate::SharedDb;
use oxcart_commerce::CommerceError;

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS product (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    price INTEGER NOT NULL CHECK (price >= 0)
);
CREATE TABLE IF NOT EXISTS cart (
    id INTEGER PRIMARY KEY AUTOINCREMENT
);
CREATE TABLE IF NOT EXISTS cart_products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cart_id INTEGER NOT NULL REFERENCES cart (id) ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES product (id) ON DELETE RESTRICT,
    quantity INTEGER NOT NULL CHECK (quantity >= 1),
    UNIQUE (cart_id, product_id)
);
CREATE INDEX IF NOT EXISTS idx_cart_products_cart ON cart_products (cart_id);
CREATE INDEX IF NOT EXISTS idx_cart_products_product ON cart_products (product_id);
";

/// Create the tables if they do not exist yet.
pub fn ensure_schema(db: &SharedDb) -> Result<(), CommerceError> {
    let db = crate::lock(db)?;
    db.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
