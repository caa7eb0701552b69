//! HTTP rendering of service errors.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use todo_core::TodoError;
use tracing::{error, warn};

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// A `TodoError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(TodoError::validation(format!(
            "invalid JSON body: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(TodoError::InvalidIdFormat(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the log.
        let message = if self.0.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
            self.0.to_string()
        } else {
            error!(error = %self.0, "request failed");
            "internal server error".to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use todo_core::StoreError;

    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (TodoError::validation("title required"), StatusCode::BAD_REQUEST),
            (TodoError::InvalidIdFormat("x".into()), StatusCode::BAD_REQUEST),
            (TodoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                TodoError::Storage(StoreError::Unavailable),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                TodoError::UnexpectedStoreResponse("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }
}
