//! Translation between persisted documents and wire todos.
//!
//! # Design
//! This module is the single place that knows how a `DocumentKey` looks on
//! the wire (24 lowercase hex characters) and how request bodies are checked
//! before anything reaches a store. Request bodies arrive as raw
//! `serde_json::Value` so that a string `"true"` or a number `1` for
//! `completed` is rejected instead of coerced.

use serde_json::Value;

use crate::error::TodoError;
use crate::key::{DocumentKey, KEY_LEN};
use crate::types::{CreateTodo, NewTodoDocument, Todo, TodoDocument};

/// Length of an encoded wire id.
pub const WIRE_ID_LEN: usize = KEY_LEN * 2;

pub fn encode_id(key: &DocumentKey) -> String {
    hex::encode(key.as_bytes())
}

/// Decode a wire id back into a document key.
///
/// Only the canonical form produced by `encode_id` is accepted: exactly
/// `WIRE_ID_LEN` characters, each in `[0-9a-f]`.
pub fn decode_id(wire_id: &str) -> Result<DocumentKey, TodoError> {
    if wire_id.len() != WIRE_ID_LEN {
        return Err(TodoError::InvalidIdFormat(format!(
            "expected {WIRE_ID_LEN} characters, got {}",
            wire_id.len()
        )));
    }
    if !wire_id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(TodoError::InvalidIdFormat(
            "expected lowercase hexadecimal characters".to_string(),
        ));
    }

    let mut bytes = [0u8; KEY_LEN];
    hex::decode_to_slice(wire_id, &mut bytes)
        .map_err(|e| TodoError::InvalidIdFormat(e.to_string()))?;
    Ok(DocumentKey::from_bytes(bytes))
}

/// Map a stored document to its wire shape. A missing `completed` reads as
/// `false`.
pub fn to_wire(document: TodoDocument) -> Todo {
    Todo {
        id: encode_id(&document.key),
        title: document.title,
        completed: document.completed.unwrap_or(false),
    }
}

/// Build the document to insert for a create request. The title must be
/// non-empty after trimming and is stored exactly as sent.
pub fn to_document_for_create(input: CreateTodo) -> Result<NewTodoDocument, TodoError> {
    match input.title {
        Some(title) if !title.trim().is_empty() => Ok(NewTodoDocument {
            title,
            completed: false,
        }),
        _ => Err(TodoError::validation("title required")),
    }
}

/// Shape-check a create body: a JSON object whose `title`, if present, is a
/// string.
pub fn create_from_body(body: &Value) -> Result<CreateTodo, TodoError> {
    let object = body
        .as_object()
        .ok_or_else(|| TodoError::validation("request body must be a JSON object"))?;
    let title = match object.get("title") {
        None | Some(Value::Null) => None,
        Some(Value::String(title)) => Some(title.clone()),
        Some(_) => return Err(TodoError::validation("title must be a string")),
    };
    Ok(CreateTodo { title })
}

/// Extract the strictly boolean `completed` member of a toggle body.
pub fn completed_from_body(body: &Value) -> Result<bool, TodoError> {
    let object = body
        .as_object()
        .ok_or_else(|| TodoError::validation("request body must be a JSON object"))?;
    match object.get("completed") {
        Some(Value::Bool(completed)) => Ok(*completed),
        Some(_) => Err(TodoError::validation("completed must be a boolean")),
        None => Err(TodoError::validation("completed required")),
    }
}
