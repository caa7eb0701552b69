//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers react
//! to them differently: a stale id versus a bug in what was sent. All other
//! non-2xx responses land in `HttpError`. When the server sent an
//! `{"error": ...}` body, its message is carried along; otherwise the raw
//! body is.

use std::fmt;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the todo does not exist, or no longer does.
    NotFound(String),

    /// The server returned 400 for the title, id or body that was sent.
    BadRequest(String),

    /// The server returned a non-2xx status other than 400 or 404.
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "not found: {msg}"),
            ApiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiError::HttpError { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
