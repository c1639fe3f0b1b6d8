//! Mapping of service errors onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use baggage_core::{ErrorBody, ServiceError};
use tracing::{debug, error};

/// An error response: status plus `{ "message": ... }`.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiFailure {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            debug!(status = %self.status, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
