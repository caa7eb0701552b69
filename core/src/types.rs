//! Wire and document shapes for todos.
//!
//! # Design
//! `Todo` is what clients see: the id is the encoded string form of the
//! document key. `TodoDocument` is what stores hold, keyed by the native
//! `DocumentKey`, with `completed` optional because older or hand-edited
//! documents may lack it. Conversion between the two lives in `mapper`.

use serde::{Deserialize, Serialize};

use crate::key::DocumentKey;

/// A single todo item as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Create input after shape checks. `title` is optional so that a missing title
/// and a blank one fail in the same place with the same error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: Option<String>,
}

/// A persisted todo document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDocument {
    pub key: DocumentKey,
    pub title: String,
    pub completed: Option<bool>,
}

/// A document ready to be inserted. The store assigns the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoDocument {
    pub title: String,
    pub completed: bool,
}
