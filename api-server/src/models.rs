//! Record types and create-payload validation.
//!
//! # Design
//! Create bodies are taken as raw JSON rather than typed DTOs: form clients
//! send numbers as strings, so `age` and `price` are coerced here instead of
//! being rejected by serde. Client-supplied `id` and `createdAt` are ignored;
//! the server assigns both.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::Collection;

/// A record type served under `/api/<collection>`.
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    const COLLECTION: Collection;
    const NOT_FOUND: &'static str;

    fn id(&self) -> Uuid;

    /// Validate a create payload and build the record to store.
    fn from_payload(payload: &Value, id: Uuid, created_at: DateTime<Utc>) -> Result<Self, ApiError>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;
    const NOT_FOUND: &'static str = "User not found";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_payload(payload: &Value, id: Uuid, created_at: DateTime<Utc>) -> Result<Self, ApiError> {
        let fields = Payload::new(payload)?;
        Ok(User {
            id,
            name: fields.required_text("name")?,
            email: fields.required_text("email")?,
            age: fields.optional_number("age")?,
            city: fields.optional_text("city")?,
            created_at,
        })
    }
}

impl Record for Product {
    const COLLECTION: Collection = Collection::Products;
    const NOT_FOUND: &'static str = "Product not found";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_payload(payload: &Value, id: Uuid, created_at: DateTime<Utc>) -> Result<Self, ApiError> {
        let fields = Payload::new(payload)?;
        let name = fields.required_text("name")?;
        let price = fields
            .optional_number("price")?
            .ok_or_else(|| ApiError::validation("price is required"))?;
        Ok(Product {
            id,
            name,
            price,
            category: fields.optional_text("category")?,
            description: fields.optional_text("description")?,
            in_stock: fields.flag("inStock", true)?,
            created_at,
        })
    }
}

/// Result of `GET /health`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn new(store_reachable: bool) -> Self {
        let (status, database) = if store_reachable {
            ("OK", "connected")
        } else {
            ("ERROR", "disconnected")
        };
        Self {
            status: status.to_string(),
            database: database.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Field accessors over a create body, one per coercion rule.
struct Payload<'a>(&'a Map<String, Value>);

impl<'a> Payload<'a> {
    fn new(value: &'a Value) -> Result<Self, ApiError> {
        value
            .as_object()
            .map(Payload)
            .ok_or_else(|| ApiError::validation("Request body must be a JSON object"))
    }

    /// Missing and `null` both read as absent.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    fn required_text(&self, field: &str) -> Result<String, ApiError> {
        self.optional_text(field)?
            .ok_or_else(|| ApiError::validation(format!("{field} is required")))
    }

    /// Trimmed text; blank strings count as absent.
    fn optional_text(&self, field: &str) -> Result<Option<String>, ApiError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Some(_) => Err(ApiError::validation(format!("{field} must be text"))),
        }
    }

    /// A JSON number or a numeric string, finite and non-negative.
    fn optional_number(&self, field: &str) -> Result<Option<f64>, ApiError> {
        let number = match self.get(field) {
            None => return Ok(None),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        match number {
            Some(n) if !n.is_finite() => Err(ApiError::validation(format!("{field} must be a number"))),
            Some(n) if n < 0.0 => Err(ApiError::validation(format!("{field} must not be negative"))),
            Some(n) => Ok(Some(n)),
            None => Err(ApiError::validation(format!("{field} must be a number"))),
        }
    }

    fn flag(&self, field: &str, default: bool) -> Result<bool, ApiError> {
        match self.get(field) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s == "true" => Ok(true),
            Some(Value::String(s)) if s == "false" => Ok(false),
            Some(_) => Err(ApiError::validation(format!("{field} must be a boolean"))),
        }
    }
}
