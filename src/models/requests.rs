//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::NewProduct;

/// Maximum accepted product name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// A price as sent by clients: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    fn parse(&self) -> Option<f64> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Request body for POST /addProduct and PUT /updateProduct/:id
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: PriceInput,
    pub description: String,
}

impl ProductRequest {
    /// Validates the body and converts it into store-ready fields.
    ///
    /// Returns an error message if validation fails.
    pub fn into_new_product(self) -> Result<NewProduct, String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "Name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        let price = self
            .price
            .parse()
            .ok_or_else(|| "Price must be a finite number".to_string())?;

        Ok(NewProduct {
            name: self.name,
            price,
            description: self.description,
        })
    }
}
