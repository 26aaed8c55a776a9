//! Error-to-status mapping for the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use oxcart_commerce::CommerceError;
use serde_json::json;

/// A commerce error on its way out as an HTTP response.
///
/// Missing referenced entities map to 404, including a missing cart or
/// product on the cart-product routes; validation failures map to 409.
#[derive(Debug)]
pub struct ApiError(pub CommerceError);

impl From<CommerceError> for ApiError {
    fn from(e: CommerceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommerceError::ProductNotFound(_)
            | CommerceError::CartNotFound(_)
            | CommerceError::LineItemNotFound { .. } => StatusCode::NOT_FOUND,
            CommerceError::Validation(_)
            | CommerceError::DuplicateLineItem { .. }
            | CommerceError::ProductInUse(_) => StatusCode::CONFLICT,
            CommerceError::Overflow | CommerceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
