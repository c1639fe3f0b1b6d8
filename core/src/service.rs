//! Client operations: list, get by id, create, update.
//!
//! # Design
//! `ClientService` owns nothing but the injected store handle, so a test can
//! build as many isolated services as it wants. Validation always runs
//! before the first store call; a rejected request never writes.
//!
//! Update validates the fields first and only then looks at `_id`, so a
//! draft with bad fields and no id reports the field error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ServiceError, StorageError, ValidationError};
use crate::store::ClientStore;
use crate::types::{ClientDraft, ClientFields, ClientId, ClientRecord, UpdateAck};
use crate::validation;

pub struct ClientService {
    store: Arc<dyn ClientStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<ClientRecord>, ServiceError> {
        let clients = self.store.find_all().await.map_err(storage_failure)?;
        debug!(count = clients.len(), "listed clients");
        Ok(clients)
    }

    /// Fetch one record. An absent or empty id is rejected without touching
    /// the store.
    pub async fn get_by_id(&self, id: Option<&str>) -> Result<ClientRecord, ServiceError> {
        let id = id
            .filter(|id| !id.is_empty())
            .map(ClientId::from)
            .ok_or_else(|| rejected(ValidationError::IdRequired))?;

        self.find_existing(&id).await
    }

    /// Validate and insert. Any `_id` on the draft is ignored; the store
    /// assigns one.
    pub async fn create(&self, draft: Option<ClientDraft>) -> Result<ClientRecord, ServiceError> {
        let fields = Self::validate(draft.as_ref()).map_err(rejected)?;

        let client = self.store.create(fields).await.map_err(storage_failure)?;
        debug!(id = %client.id, "created client");
        Ok(client)
    }

    /// Overwrite `name`, `bags` and `flightCode` of the record named by the
    /// draft's `_id`.
    pub async fn update(&self, draft: Option<ClientDraft>) -> Result<UpdateAck, ServiceError> {
        let fields = Self::validate(draft.as_ref()).map_err(rejected)?;
        let id = draft
            .and_then(|d| d.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| rejected(ValidationError::IdRequired))?;

        let mut client = self.find_existing(&id).await?;
        client.apply(fields);
        self.store.save(&client).await.map_err(storage_failure)?;

        debug!(id = %client.id, "updated client");
        Ok(UpdateAck::ok())
    }

    /// Pure field validation; see [`validation::validate`].
    pub fn validate(draft: Option<&ClientDraft>) -> Result<ClientFields, ValidationError> {
        validation::validate(draft)
    }

    async fn find_existing(&self, id: &ClientId) -> Result<ClientRecord, ServiceError> {
        match self.store.find_by_id(id).await.map_err(storage_failure)? {
            Some(client) => Ok(client),
            None => {
                debug!(%id, "client not found");
                Err(ServiceError::NotFound)
            }
        }
    }
}

fn rejected(err: ValidationError) -> ServiceError {
    debug!(reason = %err, "client request rejected");
    ServiceError::Validation(err)
}

fn storage_failure(err: StorageError) -> ServiceError {
    warn!(error = %err, "client store failed");
    ServiceError::Storage(err)
}
