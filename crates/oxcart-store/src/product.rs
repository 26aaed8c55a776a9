//! Durable product records.

use crate::{lock, scalar_i64, SharedDb};
use oxcart_commerce::{
    CommerceError, NewProduct, Page, Paginated, Product, ProductId, ProductPatch,
};
use oxcart_db::{params, Db};

/// Store handle for product CRUD.
#[derive(Clone)]
pub struct ProductStore {
    db: SharedDb,
}

impl ProductStore {
    /// Create a store over a shared connection.
    pub fn new(db: SharedDb) -> Self {
        Self { db }
    }

    /// Create a product. Fails with a validation error if the title is
    /// empty or the price negative.
    pub fn create(&self, input: NewProduct) -> Result<Product, CommerceError> {
        input.validate()?;
        let db = lock(&self.db)?;
        db.execute(
            "INSERT INTO product (title, price) VALUES (?, ?)",
            params![input.title.clone(), input.price.amount_cents],
        )?;
        let id = ProductId::new(db.last_insert_id());
        tracing::info!(product_id = %id, title = %input.title, "product created");
        Ok(Product {
            id,
            title: input.title,
            price: input.price,
        })
    }

    /// Get a product by id.
    pub fn get(&self, id: ProductId) -> Result<Product, CommerceError> {
        let db = lock(&self.db)?;
        Self::fetch(&db, id)
    }

    /// List products in id-ascending order within an offset/limit window.
    ///
    /// The order is stable across calls, so a listing can be restarted
    /// from any offset without duplicates or gaps.
    pub fn list(&self, page: Page) -> Result<Paginated<Product>, CommerceError> {
        let db = lock(&self.db)?;
        let items: Vec<Product> = db.query_as(
            "SELECT id, title, price FROM product ORDER BY id ASC LIMIT ? OFFSET ?",
            params![page.limit, page.offset],
        )?;
        let total = scalar_i64(&db, "SELECT COUNT(*) FROM product", &[])?;
        Ok(Paginated {
            items,
            offset: page.offset,
            limit: page.limit,
            total,
        })
    }

    /// Apply a patch to a product. Only provided fields are changed.
    pub fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, CommerceError> {
        let db = lock(&self.db)?;
        let product = db.with_transaction(|db| {
            let mut product = Self::fetch(db, id)?;
            patch.apply(&mut product)?;
            db.execute(
                "UPDATE product SET title = ?, price = ? WHERE id = ?",
                params![product.title.clone(), product.price.amount_cents, id.get()],
            )?;
            Ok::<_, CommerceError>(product)
        })?;
        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// Deletion is refused while any cart line item references the
    /// product, so a line item can never resolve to a missing product.
    /// The foreign-key RESTRICT on `cart_products.product_id` is the
    /// storage-level backstop for the same rule.
    pub fn delete(&self, id: ProductId) -> Result<(), CommerceError> {
        let db = lock(&self.db)?;
        db.with_transaction(|db| {
            Self::fetch(db, id)?;
            let referenced = scalar_i64(
                db,
                "SELECT COUNT(*) FROM cart_products WHERE product_id = ?",
                params![id.get()],
            )?;
            if referenced > 0 {
                return Err(CommerceError::ProductInUse(id));
            }
            db.execute("DELETE FROM product WHERE id = ?", params![id.get()])
                .map_err(|e| {
                    if e.is_constraint() {
                        CommerceError::ProductInUse(id)
                    } else {
                        CommerceError::from(e)
                    }
                })?;
            Ok(())
        })?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Load a product within an already-locked connection.
    pub(crate) fn fetch(db: &Db, id: ProductId) -> Result<Product, CommerceError> {
        db.query_as::<Product>(
            "SELECT id, title, price FROM product WHERE id = ?",
            params![id.get()],
        )?
        .into_iter()
        .next()
        .ok_or(CommerceError::ProductNotFound(id))
    }
}
