use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A catalog product as stored and returned to clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
}

/// Create/replace payload: every product field except `id`, which the server owns.
///
/// Absent fields fall back to their zero value and unknown fields (including a
/// client-sent `id`) are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
}

impl ProductInput {
    /// Reject prices and stock counts no catalog entry can carry.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !self.price.is_finite() {
            return Err(ServiceError::Validation("price must be a finite number".into()));
        }
        if self.price < 0.0 {
            return Err(ServiceError::Validation("price must not be negative".into()));
        }
        if self.stock < 0 {
            return Err(ServiceError::Validation("stock must not be negative".into()));
        }
        Ok(())
    }

    /// Attach an id, producing the stored record.
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
        }
    }
}

impl Product {
    /// Overwrite every field except `id`.
    pub fn replace_with(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.category = input.category;
    }
}
