//! HTTP surface for the todo service.
//!
//! # Design
//! Handlers are thin: they pull the path id and raw JSON body out of the
//! request, hand them to `TodoService`, and render the result. The service
//! (and the store handle inside it) is built once per process and shared
//! through router state.

pub mod config;
pub mod error;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Request, State,
    },
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use todo_core::{DocumentStore, MemoryStore, SqliteStore, StoreError, Todo, TodoService};
use tracing::{error, info};

use crate::config::StoreBackend;
use crate::error::{ApiError, ErrorBody};

pub use crate::config::ServerConfig;

#[derive(Debug, Serialize)]
pub struct Status {
    pub status: &'static str,
    pub time: String,
}

/// Open the configured document store.
pub fn open_store(backend: &StoreBackend) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store: Arc<dyn DocumentStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite { path, busy_timeout } => {
            Arc::new(SqliteStore::open(path, *busy_timeout)?)
        }
    };
    Ok(store)
}

/// Router with the todo routes nested under `base_path`, plus `/` and
/// `/status` at the root.
pub fn router(service: TodoService, base_path: &str) -> Router {
    let todos = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(toggle_todo).delete(delete_todo));

    let root = Router::new()
        .route("/", get(index))
        .route("/status", get(status));

    let app = if base_path.is_empty() {
        root.merge(todos)
    } else {
        root.nest(base_path, todos)
    };

    app.layer(middleware::from_fn(log_request)).with_state(service)
}

/// In-memory app under `/api`.
pub fn app() -> Router {
    router(TodoService::new(Arc::new(MemoryStore::new())), "/api")
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn index() -> &'static str {
    "todo service"
}

async fn status(
    State(service): State<TodoService>,
) -> Result<Json<Status>, (StatusCode, Json<ErrorBody>)> {
    match service.health().await {
        Ok(()) => Ok(Json(Status {
            status: "ok",
            time: chrono::Utc::now().to_rfc3339(),
        })),
        Err(err) => {
            error!(error = %err, "health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    error: "store unavailable".to_string(),
                }),
            ))
        }
    }
}

async fn list_todos(State(service): State<TodoService>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(service.list().await?))
}

async fn create_todo(
    State(service): State<TodoService>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(body) = body?;
    let todo = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(service): State<TodoService>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(service.toggle_completion(&id, &body).await?))
}

async fn delete_todo(
    State(service): State<TodoService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
