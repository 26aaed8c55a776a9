//! Request and response payloads.
//!
//! Required fields are modeled as `Option` so that a missing field
//! surfaces as a validation error (409) instead of a deserialization
//! rejection, matching the store-level error taxonomy.

use oxcart_commerce::{
    CartId, CommerceError, Money, NewProduct, Paginated, Product, ProductId, ProductPatch,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub price: Option<i64>,
}

impl CreateProductRequest {
    /// Convert into a creation input, requiring both fields.
    pub fn into_new_product(self) -> Result<NewProduct, CommerceError> {
        let title = self
            .title
            .ok_or_else(|| CommerceError::validation("title is required"))?;
        let price = self
            .price
            .ok_or_else(|| CommerceError::validation("price is required"))?;
        Ok(NewProduct::new(title, Money::new(price)))
    }
}

/// Body of `PUT /products/{id}`. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<i64>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            title: self.title,
            price: self.price.map(Money::new),
        }
    }
}

/// Query of `GET /products`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 1-indexed page number; defaults to the first page.
    pub page: Option<i64>,
}

/// Response of `GET /products`.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl From<Paginated<Product>> for ProductListResponse {
    fn from(page: Paginated<Product>) -> Self {
        Self {
            products: page.items,
            total: page.total,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

/// Body of `POST /cart/product` and `DELETE /cart/product`.
#[derive(Debug, Deserialize)]
pub struct CartProductRequest {
    pub cart_id: Option<i64>,
    pub product_id: Option<i64>,
    /// Only meaningful on add; defaults to 1.
    pub quantity: Option<i64>,
}

impl CartProductRequest {
    pub fn cart_id(&self) -> Result<CartId, CommerceError> {
        self.cart_id
            .map(CartId::new)
            .ok_or_else(|| CommerceError::validation("cart_id is required"))
    }

    pub fn product_id(&self) -> Result<ProductId, CommerceError> {
        self.product_id
            .map(ProductId::new)
            .ok_or_else(|| CommerceError::validation("product_id is required"))
    }

    pub fn quantity(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_both_fields() {
        let req: CreateProductRequest = serde_json::from_str(r#"{"title": "Fallout"}"#).unwrap();
        assert!(matches!(
            req.into_new_product(),
            Err(CommerceError::Validation(_))
        ));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let req: CartProductRequest =
            serde_json::from_str(r#"{"cart_id": 1, "product_id": 2}"#).unwrap();
        assert_eq!(req.quantity(), 1);
        assert_eq!(req.cart_id().unwrap(), CartId::new(1));
        assert_eq!(req.product_id().unwrap(), ProductId::new(2));
    }

    #[test]
    fn test_update_request_zero_price_is_provided() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 0}"#).unwrap();
        let patch = req.into_patch();
        assert_eq!(patch.price, Some(Money::zero()));
        assert_eq!(patch.title, None);
    }
}
