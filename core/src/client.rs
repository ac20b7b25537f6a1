//! Stateless HTTP request builder and response parser for the API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` (the `/api` prefix included) and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP round-trip.

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, HealthReport, NewProduct, NewUser, Product, User};

/// Synchronous, stateless client for the users/products API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Health lives at the server root, outside `/api`.
    pub fn build_health(&self) -> HttpRequest {
        let root = self.base_url.strip_suffix("/api").unwrap_or(&self.base_url);
        get(format!("{root}/health"))
    }

    pub fn build_list_users(&self) -> HttpRequest {
        get(format!("{}/users", self.base_url))
    }

    pub fn build_list_products(&self) -> HttpRequest {
        get(format!("{}/products", self.base_url))
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        post_json(format!("{}/users", self.base_url), input)
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, ApiError> {
        post_json(format!("{}/products", self.base_url), input)
    }

    pub fn build_delete_user(&self, id: Uuid) -> HttpRequest {
        delete(format!("{}/users/{id}", self.base_url))
    }

    pub fn build_delete_product(&self, id: Uuid) -> HttpRequest {
        delete(format!("{}/products/{id}", self.base_url))
    }

    /// 503 still carries a report describing the outage.
    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthReport, ApiError> {
        check_status(&response, |status| status == 200 || status == 503)?;
        decode(&response)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, |status| status == 200)?;
        decode(&response)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response, |status| status == 200)?;
        decode(&response)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, |status| status == 201)?;
        decode(&response)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, |status| status == 201)?;
        decode(&response)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, is_success)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, is_success)
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn delete(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn post_json<T: Serialize>(path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map unaccepted status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: fn(u16) -> bool) -> Result<(), ApiError> {
    if accepted(response.status) {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .map(|body| body.error);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Rejected {
        status: response.status,
        message,
    })
}
