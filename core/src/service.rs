//! The four todo operations against a document store.
//!
//! # Design
//! `TodoService` holds only a shared store handle and keeps no documents
//! between calls: every operation reads or writes the store directly. Each
//! mutation is one store call, relying on the store's single-document
//! atomicity. Request bodies are taken as raw JSON and shape-checked through
//! `mapper` before any id is decoded or any store call is made.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::TodoError;
use crate::mapper;
use crate::store::DocumentStore;
use crate::types::Todo;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService").finish_non_exhaustive()
    }
}

impl TodoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let docs = self.store.find_all().await.map_err(storage)?;
        debug!(count = docs.len(), "listed todos");
        Ok(docs.into_iter().map(mapper::to_wire).collect())
    }

    pub async fn create(&self, body: &Value) -> Result<Todo, TodoError> {
        let input = mapper::create_from_body(body)?;
        let new = mapper::to_document_for_create(input)?;
        let doc = self.store.insert_one(new).await.map_err(storage)?;
        let todo = mapper::to_wire(doc);
        debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Set `completed` on the todo with `wire_id`. The body is checked before
    /// the id, so a non-boolean `completed` is a validation error whether or
    /// not the id exists.
    pub async fn toggle_completion(&self, wire_id: &str, body: &Value) -> Result<Todo, TodoError> {
        let completed = mapper::completed_from_body(body)?;
        let key = mapper::decode_id(wire_id)?;

        let doc = self
            .store
            .find_one_and_update_completed(&key, completed)
            .await
            .map_err(storage)?
            .ok_or_else(|| TodoError::NotFound(wire_id.to_string()))?;

        if doc.key != key {
            return Err(TodoError::UnexpectedStoreResponse(format!(
                "update of {wire_id} returned document {}",
                mapper::encode_id(&doc.key)
            )));
        }

        debug!(id = wire_id, completed, "updated todo");
        Ok(mapper::to_wire(doc))
    }

    pub async fn delete(&self, wire_id: &str) -> Result<(), TodoError> {
        let key = mapper::decode_id(wire_id)?;
        match self.store.delete_one(&key).await.map_err(storage)? {
            0 => Err(TodoError::NotFound(wire_id.to_string())),
            1 => {
                debug!(id = wire_id, "deleted todo");
                Ok(())
            }
            n => Err(TodoError::UnexpectedStoreResponse(format!(
                "delete of {wire_id} removed {n} documents"
            ))),
        }
    }

    /// Check that the store answers.
    pub async fn health(&self) -> Result<(), TodoError> {
        self.store.ping().await.map_err(storage)
    }
}

fn storage(err: crate::store::StoreError) -> TodoError {
    error!(error = %err, "store operation failed");
    TodoError::Storage(err)
}
