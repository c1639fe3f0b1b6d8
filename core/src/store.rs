//! Storage capability consumed by `ClientService`, plus an in-memory store.
//!
//! # Design
//! The trait covers exactly what the service needs from a document store:
//! list, point lookup, insert with a store-assigned id, and save of a loaded
//! record. Update is load + mutate + save in the service; stores provide no
//! compare-and-set, so concurrent updates are last-write-wins.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::schema::ClientSchema;
use crate::types::{ClientFields, ClientId, ClientRecord};

/// Contract for the client document store.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Every record, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<ClientRecord>, StorageError>;

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<ClientRecord>, StorageError>;

    /// Insert a new record under a freshly assigned id and return it.
    async fn create(&self, fields: ClientFields) -> Result<ClientRecord, StorageError>;

    /// Write back a record previously returned by this store.
    async fn save(&self, record: &ClientRecord) -> Result<(), StorageError>;
}

/// Process-local store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientStore {
    records: Arc<RwLock<BTreeMap<ClientId, ClientRecord>>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with a caller-chosen id, e.g. to seed fixtures.
    pub async fn insert(&self, record: ClientRecord) -> Result<(), StorageError> {
        ClientSchema::check(&record)?;
        match self.records.write().await.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateKey(record.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_all(&self) -> Result<Vec<ClientRecord>, StorageError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<ClientRecord>, StorageError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn create(&self, fields: ClientFields) -> Result<ClientRecord, StorageError> {
        let record = fields.into_record(ClientId::generate());
        self.insert(record.clone()).await?;
        Ok(record)
    }

    async fn save(&self, record: &ClientRecord) -> Result<(), StorageError> {
        ClientSchema::check(record)?;
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}
