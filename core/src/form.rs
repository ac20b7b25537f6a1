//! Raw form state and its conversion into create payloads.
//!
//! Fields hold exactly what the user typed. Blank optional fields become
//! `None`; anything non-blank is kept, so an age of `0` is sent as `0`.

use crate::error::FormError;
use crate::types::{NewProduct, NewUser};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub city: String,
}

impl UserForm {
    /// Name and email are passed through even when blank; the server owns
    /// the required-field check and its message.
    pub fn to_payload(&self) -> Result<NewUser, FormError> {
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: optional_number(&self.age, "age")?,
            city: optional_text(&self.city),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub in_stock: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            category: String::new(),
            description: String::new(),
            in_stock: true,
        }
    }
}

impl ProductForm {
    pub fn to_payload(&self) -> Result<NewProduct, FormError> {
        let price = optional_number(&self.price, "price")?.ok_or(FormError::Missing("price"))?;
        Ok(NewProduct {
            name: self.name.trim().to_string(),
            price,
            category: optional_text(&self.category),
            description: optional_text(&self.description),
            in_stock: self.in_stock,
        })
    }

    /// Back to defaults, which leaves the in-stock box checked.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_number(value: &str, field: &'static str) -> Result<Option<f64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(FormError::InvalidNumber(field)),
    }
}
