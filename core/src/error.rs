//! Error types for the API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because delete callers distinguish
//! "the record is already gone" from other rejections. Both carry the
//! server's `{error}` message when the body had one, so the dashboard can
//! show it verbatim.

use thiserror::Error;

use crate::http::TransportError;

/// Errors returned by `ApiClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {}", .message.as_deref().unwrap_or("no message"))]
    NotFound { message: Option<String> },

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The `{error}` text the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Failure of one round-trip: either no response, or a response the client
/// could not accept.
#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A form could not be turned into a create payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
}
