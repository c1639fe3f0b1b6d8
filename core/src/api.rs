//! Stateless request builder and response parser for the clients REST API.
//!
//! # Design
//! `ClientsApi` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller does the I/O in between.
//! Error bodies carry the service's message, which the parse methods hand
//! back in `ApiError::Validation` / `ApiError::NotFound`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ClientDraft, ClientEnvelope, ClientRecord, ErrorBody, UpdateAck};

const CLIENTS_PATH: &str = "/api/clients";

#[derive(Debug, Clone)]
pub struct ClientsApi {
    base_url: String,
}

impl ClientsApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_clients(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{CLIENTS_PATH}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_client(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!(
                "{}{CLIENTS_PATH}/client?id={}",
                self.base_url,
                urlencoding::encode(id)
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `draft` of `None` sends `{"client": null}`, which the server rejects
    /// as missing data.
    pub fn build_create_client(&self, draft: Option<&ClientDraft>) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Post, draft)
    }

    pub fn build_update_client(&self, draft: Option<&ClientDraft>) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Put, draft)
    }

    pub fn parse_list_clients(&self, response: HttpResponse) -> Result<Vec<ClientRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_client(&self, response: HttpResponse) -> Result<ClientRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_client(&self, response: HttpResponse) -> Result<ClientRecord, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_client(&self, response: HttpResponse) -> Result<UpdateAck, ApiError> {
        parse_json(response)
    }

    fn build_with_body(
        &self,
        method: HttpMethod,
        draft: Option<&ClientDraft>,
    ) -> Result<HttpRequest, ApiError> {
        let envelope = ClientEnvelope {
            client: draft.cloned(),
        };
        let body = serde_json::to_string(&envelope)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{CLIENTS_PATH}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Every clients endpoint answers 200 on success.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        400 => Err(ApiError::Validation(error_message(response))),
        404 => Err(ApiError::NotFound(error_message(response))),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// The `message` of an error body, or the raw body if it is not one.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .map(|b| b.message)
        .unwrap_or_else(|_| response.body.clone())
}
