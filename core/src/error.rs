//! Error types for the client service and the API client.
//!
//! # Design
//! `ServiceError` is the whole taxonomy the HTTP layer has to map:
//! bad input (`Validation`), a missing record (`NotFound`), and anything
//! the store reports (`Storage`, message passed through untouched).
//! `ApiError` is the caller-side view of the same failures after they have
//! crossed HTTP.

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Input rejected before any storage access. Display strings are part of the
/// API: they are sent back verbatim as the response `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Client data is required")]
    DataRequired,

    #[error("Bags should be a number between 1 and 5")]
    BagsOutOfRange,

    #[error("Client name is required")]
    NameRequired,

    #[error("Flight code is required")]
    FlightCodeRequired,

    #[error("ID field is required")]
    IdRequired,
}

/// Failure reported by a `ClientStore`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The record broke a collection constraint and was not written.
    #[error("Client validation failed: {0}")]
    Schema(#[from] SchemaViolation),

    /// A write would overwrite an existing document with the same id.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The backend itself failed (I/O, corrupt document, ...).
    #[error("{0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Errors returned by `ClientService` operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Client not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors returned by `ClientsApi` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 400 with the validation message.
    #[error("{0}")]
    Validation(String),

    /// The server returned 404.
    #[error("{0}")]
    NotFound(String),

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_display_their_message() {
        let err = ServiceError::from(ValidationError::IdRequired);
        assert_eq!(err.to_string(), "ID field is required");
        assert_eq!(ServiceError::NotFound.to_string(), "Client not found");
    }

    #[test]
    fn storage_errors_pass_through_verbatim() {
        let err = ServiceError::from(StorageError::backend("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn schema_violation_becomes_storage_error() {
        let err: StorageError = SchemaViolation::Required("name").into();
        assert_eq!(
            err.to_string(),
            "Client validation failed: path `name` is required"
        );
    }
}
