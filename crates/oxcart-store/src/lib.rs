//! Durable stores and the line-item merge engine for Oxcart.
//!
//! The stores persist products and carts in SQLite through [`oxcart_db`];
//! [`CartService`] is the merge engine, running each read-merge-write
//! sequence inside one immediate transaction. Stores and the service are
//! plain handles over a shared connection, constructed explicitly and
//! passed in where needed.
//!
//! # Example
//!
//! ```rust
//! use oxcart_commerce::prelude::*;
//! use oxcart_store::{shared, CartService, CartStore, ProductStore};
//!
//! let db = shared(oxcart_db::Db::open_in_memory().unwrap());
//! oxcart_store::ensure_schema(&db).unwrap();
//!
//! let products = ProductStore::new(db.clone());
//! let carts = CartStore::new(db.clone());
//! let service = CartService::new(db, products.clone(), carts.clone());
//!
//! let fallout = products
//!     .create(NewProduct::new("Fallout", Money::new(199)))
//!     .unwrap();
//! let cart = carts.create().unwrap();
//!
//! service.add_product(cart.id, fallout.id, 1).unwrap();
//! let view = service.add_product(cart.id, fallout.id, 1).unwrap();
//! assert_eq!(view.subtotal_formatted, "3.98");
//! ```

pub mod cart;
pub mod fixtures;
pub mod product;
pub mod schema;
pub mod service;

pub use cart::CartStore;
pub use product::ProductStore;
pub use schema::ensure_schema;
pub use service::{CartService, CartView, LineItemView};

use oxcart_commerce::CommerceError;
use oxcart_db::{Db, DbError, Value};
use std::sync::{Arc, Mutex, MutexGuard};

/// A database connection shared between store handles.
pub type SharedDb = Arc<Mutex<Db>>;

/// Wrap a connection for sharing between store handles.
pub fn shared(db: Db) -> SharedDb {
    Arc::new(Mutex::new(db))
}

/// Lock the shared connection for the duration of one operation.
pub(crate) fn lock(db: &SharedDb) -> Result<MutexGuard<'_, Db>, CommerceError> {
    db.lock()
        .map_err(|_| CommerceError::Database("database mutex poisoned".to_string()))
}

/// Run a single-column integer query (COUNT and friends).
pub(crate) fn scalar_i64(db: &Db, sql: &str, params: &[Value]) -> Result<i64, DbError> {
    db.query(sql, params)?
        .first()
        .and_then(|row| row.get_index(0))
        .and_then(Value::as_integer)
        .ok_or(DbError::NotFound)
}
