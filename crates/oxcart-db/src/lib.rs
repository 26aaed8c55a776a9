//! Type-safe SQLite database layer for Oxcart.
//!
//! Provides a simple, ergonomic API over rusqlite with type-safe query
//! results and a closure-style transaction API.
//!
//! # Example
//!
//! ```rust
//! use oxcart_db::{Db, params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Product {
//!     id: i64,
//!     title: String,
//!     price: i64,
//! }
//!
//! let db = Db::open_in_memory().unwrap();
//! db.execute_batch(
//!     "CREATE TABLE product (id INTEGER PRIMARY KEY, title TEXT NOT NULL, price INTEGER NOT NULL)",
//! )
//! .unwrap();
//!
//! db.execute(
//!     "INSERT INTO product (title, price) VALUES (?, ?)",
//!     params!["Fallout", 199],
//! )
//! .unwrap();
//!
//! let products: Vec<Product> = db
//!     .query_as("SELECT id, title, price FROM product WHERE price < ?", params![500])
//!     .unwrap();
//! assert_eq!(products.len(), 1);
//! ```

mod db;
mod error;
mod types;

pub use db::Db;
pub use error::DbError;
pub use types::{QueryResult, Row, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{params, Db, DbError, QueryResult, Row, Value};
}

/// Create a parameter list for SQL queries.
///
/// # Example
///
/// ```rust
/// use oxcart_db::params;
///
/// let params = params!["value1", 42];
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
