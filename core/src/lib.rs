//! Resource model and persistence mapping for the todo service.
//!
//! # Overview
//! Translates between wire todos (`{id, title, completed}` with an opaque
//! string id), persisted documents keyed by a store-native `DocumentKey`,
//! and the operations clients can perform on them.
//!
//! # Design
//! - `mapper` is the only module that knows the wire id encoding and the
//!   request body shapes.
//! - `service::TodoService` implements list, create, toggle and delete on top
//!   of any `store::DocumentStore`, and holds no state besides the store
//!   handle.
//! - Every failure is a `TodoError` carrying its HTTP status, so the HTTP
//!   layer only has to render it.

pub mod error;
pub mod key;
pub mod mapper;
pub mod service;
pub mod store;
pub mod types;

pub use error::TodoError;
pub use key::DocumentKey;
pub use service::TodoService;
pub use store::{DocumentStore, MemoryStore, SqliteStore, StoreError};
pub use types::{CreateTodo, NewTodoDocument, Todo, TodoDocument};
