//! Client baggage records: validation, persistence, and the REST API client.
//!
//! # Overview
//! `ClientService` validates candidate records and runs list / get / create /
//! update against any `ClientStore`. The store is injected at construction,
//! so tests and the server each pick their own backend.
//!
//! # Design
//! - Validation is pure and runs before any store call.
//! - Stores re-check `ClientSchema` before writing.
//! - `ClientsApi` builds requests and parses responses for the HTTP surface
//!   without doing I/O itself.

pub mod api;
pub mod error;
pub mod http;
pub mod schema;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use api::ClientsApi;
pub use error::{ApiError, ServiceError, StorageError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use schema::{ClientSchema, Collation, SchemaViolation, Strength};
pub use service::ClientService;
pub use store::{ClientStore, MemoryClientStore};
pub use types::{
    ClientDraft, ClientEnvelope, ClientFields, ClientId, ClientRecord, ErrorBody, UpdateAck,
};
pub use validation::validate;
