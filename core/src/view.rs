//! What the dashboard shows: list states, status indicators, card text.

use crate::types::{HealthReport, Product, User};

pub const NO_USERS: &str = "No users found. Add your first user!";
pub const NO_PRODUCTS: &str = "No products found. Add your first product!";
pub const USERS_FAILED: &str = "Error loading users. Please try again.";
pub const PRODUCTS_FAILED: &str = "Error loading products. Please try again.";

const NOT_SPECIFIED: &str = "Not specified";

/// The two mutually exclusive panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Users,
    Products,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    Empty(&'static str),
    Items(Vec<T>),
    Failed(&'static str),
}

impl<T> ListView<T> {
    /// Empty results get the placeholder instead of an empty list.
    pub fn from_items(items: Vec<T>, placeholder: &'static str) -> Self {
        if items.is_empty() {
            ListView::Empty(placeholder)
        } else {
            ListView::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListView::Items(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub text: &'static str,
    pub ok: bool,
}

impl Indicator {
    const CONNECTED: Indicator = Indicator { text: "Connected", ok: true };
    const DISCONNECTED: Indicator = Indicator { text: "Disconnected", ok: false };
    const UNKNOWN: Indicator = Indicator { text: "Unknown", ok: false };
    const CHECKING: Indicator = Indicator { text: "Checking...", ok: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    pub backend: Indicator,
    pub database: Indicator,
}

impl StatusView {
    pub fn checking() -> Self {
        Self {
            backend: Indicator::CHECKING,
            database: Indicator::CHECKING,
        }
    }

    /// The backend answered; the report says whether the store did.
    pub fn from_report(report: &HealthReport) -> Self {
        let database = if report.database_connected() {
            Indicator::CONNECTED
        } else {
            Indicator::DISCONNECTED
        };
        Self {
            backend: Indicator::CONNECTED,
            database,
        }
    }

    /// No usable answer from the backend at all.
    pub fn unreachable() -> Self {
        Self {
            backend: Indicator::DISCONNECTED,
            database: Indicator::UNKNOWN,
        }
    }
}

pub fn user_lines(user: &User) -> Vec<String> {
    let age = user
        .age
        .map(format_number)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    vec![
        user.email.clone(),
        format!("Age: {age}"),
        format!("City: {}", user.city.as_deref().unwrap_or(NOT_SPECIFIED)),
        format!("Joined: {}", user.created_at.format("%Y-%m-%d")),
    ]
}

pub fn product_lines(product: &Product) -> Vec<String> {
    vec![
        format!("${:.2}", product.price),
        format!("Category: {}", product.category.as_deref().unwrap_or("Uncategorized")),
        product.description.clone().unwrap_or_else(|| "No description".to_string()),
        stock_label(product.in_stock).to_string(),
    ]
}

pub fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// Whole numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}
