//! Persisted document store abstraction.
//!
//! # Design
//! `DocumentStore` is the narrow seam between the service and whatever holds
//! the documents. Every mutating method is one atomic operation on one
//! document, so concurrent requests never interleave inside an operation and
//! the service needs no locking of its own. Stores mint `DocumentKey`s on
//! insert; callers never choose keys.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::key::DocumentKey;
use crate::types::{NewTodoDocument, TodoDocument};

/// Failures reported by a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable")]
    Unavailable,

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("corrupt document: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document, in the store's natural retrieval order.
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError>;

    /// Insert one document and return it with its newly assigned key.
    async fn insert_one(&self, document: NewTodoDocument) -> Result<TodoDocument, StoreError>;

    /// Atomically set `completed` on the document with `key` and return the
    /// document as it is after the update, or `None` when nothing matched.
    async fn find_one_and_update_completed(
        &self,
        key: &DocumentKey,
        completed: bool,
    ) -> Result<Option<TodoDocument>, StoreError>;

    /// Delete the document with `key`, returning how many were removed.
    async fn delete_one(&self, key: &DocumentKey) -> Result<u64, StoreError>;

    /// Round-trip to the store without touching any document.
    async fn ping(&self) -> Result<(), StoreError>;
}
