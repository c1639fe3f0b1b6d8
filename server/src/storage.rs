//! Embedded document store for client records, backed by `sled`.
//!
//! Records live as JSON documents in the `clients` tree, keyed by id, so
//! iteration order (and therefore list order) is id order. Every write is
//! flushed before it is acknowledged.

use std::path::Path;

use async_trait::async_trait;
use baggage_core::{
    ClientFields, ClientId, ClientRecord, ClientSchema, ClientStore, StorageError,
};
use sled::{Config, Db, IVec, Tree};
use tracing::debug;

#[derive(Clone)]
pub struct SledClientStore {
    db: Db,
    clients: Tree,
}

impl SledClientStore {
    /// Opens (or creates) a database rooted at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let db = Config::default()
            .path(path)
            .open()
            .map_err(|err| StorageError::backend(format!("failed to open {path:?}: {err}")))?;
        Self::from_db(db)
    }

    /// A database that lives only as long as this handle.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = Config::default()
            .temporary(true)
            .open()
            .map_err(|err| StorageError::backend(format!("failed to open temporary db: {err}")))?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StorageError> {
        let clients = db.open_tree(ClientSchema::COLLECTION).map_err(|err| {
            StorageError::backend(format!("failed to open clients tree: {err}"))
        })?;
        Ok(Self { db, clients })
    }

    /// Insert a record with a caller-chosen id, e.g. to seed fixtures.
    pub async fn insert(&self, record: &ClientRecord) -> Result<(), StorageError> {
        ClientSchema::check(record)?;
        let bytes = encode(record)?;
        self.clients
            .compare_and_swap(record.id.as_str(), None as Option<&[u8]>, Some(bytes))
            .map_err(|err| StorageError::backend(format!("failed to insert client: {err}")))?
            .map_err(|_| StorageError::DuplicateKey(record.id.to_string()))?;
        self.flush().await
    }

    async fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush_async()
            .await
            .map_err(|err| StorageError::backend(format!("failed to flush db: {err}")))?;
        Ok(())
    }
}

fn encode(record: &ClientRecord) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(record)
        .map_err(|err| StorageError::backend(format!("serialization error: {err}")))
}

fn decode(bytes: &IVec) -> Result<ClientRecord, StorageError> {
    serde_json::from_slice(bytes)
        .map_err(|err| StorageError::backend(format!("corrupt client document: {err}")))
}

// Reads and inserts call sled inline; with a collection this small they are
// served from its page cache. Durable writes wait on `flush_async` instead.
#[async_trait]
impl ClientStore for SledClientStore {
    async fn find_all(&self) -> Result<Vec<ClientRecord>, StorageError> {
        self.clients
            .iter()
            .values()
            .map(|value| {
                let value = value
                    .map_err(|err| StorageError::backend(format!("failed to read client: {err}")))?;
                decode(&value)
            })
            .collect()
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<ClientRecord>, StorageError> {
        let value = self
            .clients
            .get(id.as_str())
            .map_err(|err| StorageError::backend(format!("failed to read client: {err}")))?;
        value.as_ref().map(decode).transpose()
    }

    async fn create(&self, fields: ClientFields) -> Result<ClientRecord, StorageError> {
        let record = fields.into_record(ClientId::generate());
        self.insert(&record).await?;
        debug!(id = %record.id, "stored new client document");
        Ok(record)
    }

    async fn save(&self, record: &ClientRecord) -> Result<(), StorageError> {
        ClientSchema::check(record)?;
        let bytes = encode(record)?;
        self.clients
            .insert(record.id.as_str(), bytes)
            .map_err(|err| StorageError::backend(format!("failed to save client: {err}")))?;
        self.flush().await
    }
}
