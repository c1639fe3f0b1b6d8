//! Client record types and the JSON payloads exchanged over the REST API.
//!
//! # Design
//! `ClientRecord` is what storage holds: every field present, `bags` already
//! inside the schema range. `ClientDraft` is what callers send: every field
//! optional, so "missing" stays distinguishable from "zero" or "empty" until
//! validation turns it into `ClientFields`. `bags` is kept as the raw JSON
//! number, so `0.5` or `1e20` reach validation and get the range message
//! instead of failing to deserialize.
//!
//! Field names follow the document-store wire shape (`_id`, `flightCode`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// Length of a generated id, in hex characters.
pub const CLIENT_ID_LEN: usize = 24;

/// Identifier of a stored client record. Assigned by the store on create.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh 24-char lowercase hex id, the same shape as a document-store
    /// object id.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let hex = uuid.as_bytes()[..CLIENT_ID_LEN / 2]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A persisted client baggage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(rename = "_id")]
    pub id: ClientId,
    pub name: String,
    pub bags: i64,
    pub flight_code: String,
}

impl ClientRecord {
    /// Overwrite the mutable fields, keeping `id`.
    pub fn apply(&mut self, fields: ClientFields) {
        self.name = fields.name;
        self.bags = fields.bags;
        self.flight_code = fields.flight_code;
    }
}

/// Candidate record as received from a caller. Nothing is guaranteed until
/// it passes `validation::validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bags: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_code: Option<String>,
}

impl ClientDraft {
    pub fn new(name: impl Into<String>, bags: i64, flight_code: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            bags: Some(Number::from(bags)),
            flight_code: Some(flight_code.into()),
        }
    }

    pub fn with_id(mut self, id: impl Into<ClientId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// The validated, writable part of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub bags: i64,
    pub flight_code: String,
}

impl ClientFields {
    pub fn into_record(self, id: ClientId) -> ClientRecord {
        ClientRecord {
            id,
            name: self.name,
            bags: self.bags,
            flight_code: self.flight_code,
        }
    }
}

/// Request body for create and update: `{ "client": { ... } }`.
///
/// A body without the `client` key (or with `null`) carries no data at all,
/// which validation reports as "Client data is required".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientEnvelope {
    #[serde(default)]
    pub client: Option<ClientDraft>,
}

/// Response body of a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub success: bool,
}

impl UpdateAck {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
