//! Product catalog types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A purchasable item in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Price in minor currency units.
    pub price: Money,
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    /// Product title.
    pub title: String,
    /// Price in minor currency units.
    pub price: Money,
}

impl NewProduct {
    /// Create a new product input.
    pub fn new(title: impl Into<String>, price: Money) -> Self {
        Self {
            title: title.into(),
            price,
        }
    }

    /// Validate the input: the title must be non-empty and the price
    /// non-negative.
    pub fn validate(&self) -> Result<(), CommerceError> {
        validate_title(&self.title)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// A partial product update with explicit field-presence semantics.
///
/// `None` means "leave the field untouched"; `Some` means "set it to this
/// value", and the provided value is validated. A price of zero or an
/// empty title is therefore *provided* input, not an absent field: zero is
/// applied, the empty title is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductPatch {
    /// New title, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New price in minor units, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl ProductPatch {
    /// True when no field is provided.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none()
    }

    /// Apply the provided fields to a product, validating each one.
    pub fn apply(&self, product: &mut Product) -> Result<(), CommerceError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
            product.title = title.clone();
        }
        if let Some(price) = self.price {
            validate_price(price)?;
            product.price = price;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), CommerceError> {
    if title.trim().is_empty() {
        return Err(CommerceError::validation("product title must not be empty"));
    }
    Ok(())
}

fn validate_price(price: Money) -> Result<(), CommerceError> {
    if price.is_negative() {
        return Err(CommerceError::validation(
            "product price must not be negative",
        ));
    }
    Ok(())
}
