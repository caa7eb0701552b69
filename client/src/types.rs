//! Request and response bodies of the todo API.
//!
//! # Design
//! These types mirror the server's wire schema but are defined independently,
//! so the client does not pull in the server's store or HTTP stack.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API. `id` is opaque to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for setting a todo's completion flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleTodo {
    pub completed: bool,
}

/// Body the server sends with every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
