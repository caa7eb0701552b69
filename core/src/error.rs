//! Error types for the todo service.
//!
//! # Design
//! `TodoError` is the only error the service hands to its callers. Each
//! variant maps to exactly one HTTP status via `status_code`, so the HTTP
//! layer never has to inspect messages. Client mistakes (`Validation`,
//! `InvalidIdFormat`) are kept apart from `NotFound`, and a store that
//! answers with something other than what was asked for lands in
//! `UnexpectedStoreResponse` rather than being read as a miss.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by `TodoService` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// A request field is missing, blank, or has the wrong JSON type.
    #[error("{0}")]
    Validation(String),

    /// The wire id is not a syntactically valid encoding of a document key.
    #[error("invalid id format: {0}")]
    InvalidIdFormat(String),

    /// The id is well formed but no document has that key.
    #[error("todo {0} not found")]
    NotFound(String),

    /// The store is unreachable or failed the operation.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The store completed the operation but answered with an unexpected shape.
    #[error("unexpected store response: {0}")]
    UnexpectedStoreResponse(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation(message.into())
    }

    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::Validation(_) | TodoError::InvalidIdFormat(_) => 400,
            TodoError::NotFound(_) => 404,
            TodoError::Storage(_) | TodoError::UnexpectedStoreResponse(_) => 500,
        }
    }

    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
