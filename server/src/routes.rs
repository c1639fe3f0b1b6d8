//! Handlers for `/api/clients`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use baggage_core::{ClientEnvelope, ClientRecord, UpdateAck};
use serde::{Deserialize, Serialize};

use crate::error::ApiFailure;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientRecord>>, ApiFailure> {
    Ok(Json(state.clients.get_all().await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<ClientRecord>, ApiFailure> {
    Ok(Json(state.clients.get_by_id(query.id.as_deref()).await?))
}

pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientEnvelope>, JsonRejection>,
) -> Result<Json<ClientRecord>, ApiFailure> {
    let Json(envelope) = payload?;
    Ok(Json(state.clients.create(envelope.client).await?))
}

pub async fn update_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientEnvelope>, JsonRejection>,
) -> Result<Json<UpdateAck>, ApiFailure> {
    let Json(envelope) = payload?;
    Ok(Json(state.clients.update(envelope.client).await?))
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
