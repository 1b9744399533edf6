//! Product entity
//!
//! The flat record stored in the `PRODUCTS` table and mirrored into the cache.

use serde::{Deserialize, Serialize};

// == Product ==
/// A persisted product. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    /// Attaches a store-assigned id to a payload.
    pub fn with_id(id: i64, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            description: fields.description,
        }
    }
}

// == New Product ==
/// Product fields without an id, used for inserts and full-record updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_flat() {
        let product = Product::with_id(7, NewProduct::new("Widget", 9.99, "A widget"));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["description"], "A widget");
    }

    #[test]
    fn test_product_deserializes_from_cached_json() {
        let cached = r#"{"id":3,"name":"Gadget","price":12.5,"description":"Shiny"}"#;
        let product: Product = serde_json::from_str(cached).unwrap();

        assert_eq!(product.id, 3);
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.price, 12.5);
    }
}
