//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the API base URL (including any route prefix such
//! as `/api`) and carries no state between calls. Each of the four
//! operations the API offers is split into a `build_*` method producing an
//! `HttpRequest` and a `parse_*` method consuming the `HttpResponse`. The
//! caller executes the round-trip, so this crate does no I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ErrorBody, Todo, ToggleTodo};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/todos", self.base_url), None)
    }

    pub fn build_create_todo(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let body = to_json(&CreateTodo {
            title: title.to_string(),
        })?;
        Ok(self.request(
            HttpMethod::Post,
            format!("{}/todos", self.base_url),
            Some(body),
        ))
    }

    /// `id` is used verbatim in the path; pass ids exactly as the server
    /// returned them.
    pub fn build_toggle_todo(&self, id: &str, completed: bool) -> Result<HttpRequest, ApiError> {
        let body = to_json(&ToggleTodo { completed })?;
        Ok(self.request(
            HttpMethod::Put,
            format!("{}/todos/{id}", self.base_url),
            Some(body),
        ))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            format!("{}/todos/{id}", self.base_url),
            None,
        )
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        from_json(&response.body)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| response.body.clone());
    Err(match response.status {
        400 => ApiError::BadRequest(message),
        404 => ApiError::NotFound(message),
        status => ApiError::HttpError { status, message },
    })
}
