//! Synchronous client core for the todo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO). It covers the four calls a todo
//! frontend makes: load the list, add a todo, toggle completion, delete.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the base URL.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - Error responses are decoded from the server's `{"error": ...}` body.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, ToggleTodo};
