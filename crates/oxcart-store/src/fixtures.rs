//! Seed data for a fresh catalog.

use crate::product::ProductStore;
use oxcart_commerce::{CommerceError, Money, NewProduct, Page};

/// The starter catalog: title and price in minor units.
pub const SEED_PRODUCTS: &[(&str, i64)] = &[
    ("Fallout", 199),
    ("Don't Starve", 299),
    ("Baldur's Gate", 399),
    ("Icewind Dale", 499),
    ("Bloodborne", 599),
];

/// Seed the catalog if it is empty. Returns the number of products
/// created; an already-populated catalog is left untouched.
pub fn seed(products: &ProductStore) -> Result<usize, CommerceError> {
    let existing = products.list(Page::new(0, 1))?;
    if existing.total > 0 {
        tracing::debug!(total = existing.total, "catalog already populated, skipping seed");
        return Ok(0);
    }

    for (title, price) in SEED_PRODUCTS {
        products.create(NewProduct::new(*title, Money::new(*price)))?;
    }
    tracing::info!(count = SEED_PRODUCTS.len(), "catalog seeded");
    Ok(SEED_PRODUCTS.len())
}
