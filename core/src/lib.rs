//! Client core for the users/products dashboard.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the dashboard's UI
//! state: active tab, status indicators, lists, forms, notifications.
//!
//! # Design
//! - `ApiClient` is stateless — it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `Dashboard` runs the load/submit/delete flows over any `Transport`;
//!   front ends provide the transport and render the state.
//! - DTOs are defined independently from the api-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod http;
pub mod notify;
pub mod types;
pub mod view;

pub use client::ApiClient;
pub use dashboard::{Dashboard, RecordKind};
pub use error::{ApiError, CallError, FormError};
pub use form::{ProductForm, UserForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use notify::{Level, Notification, Notifications, Phase};
pub use types::{HealthReport, NewProduct, NewUser, Product, User};
pub use view::{ListView, StatusView, Tab};
