//! HTTP boundary for the Oxcart shopping-cart backend.
//!
//! The handlers here are thin: they deserialize a request, call into the
//! stores and the merge engine, and map typed errors to status codes.
//! Everything with behavior lives in `oxcart-store` and
//! `oxcart-commerce`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod payload;

pub use app::{router, AppState};
