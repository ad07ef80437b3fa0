//! Document storage
//!
//! The gateway reads and merges a single document. Two backends are
//! available: a process-local map and Cloud Firestore over REST.

pub mod firestore;
pub mod memory;

use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::Result;
use tracing::info;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Top-level fields of a stored document
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Document store backend
#[derive(Debug)]
pub enum DocumentStore {
    Memory(MemoryStore),
    Firestore(FirestoreStore),
}

impl DocumentStore {
    /// Create the configured backend.
    ///
    /// `fallback_project` is used as the Firestore project when the storage
    /// section does not name one.
    pub fn new(config: &StorageConfig, fallback_project: &str) -> Result<Self> {
        info!("Initializing document store: {:?}", config.backend);

        match config.backend {
            StorageBackend::Memory => Ok(Self::Memory(MemoryStore::new())),
            StorageBackend::Firestore => Ok(Self::Firestore(FirestoreStore::new(
                &config.firestore,
                fallback_project,
            )?)),
        }
    }

    /// Fetch a document, `None` when it does not exist
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        match self {
            Self::Memory(store) => Ok(store.get(collection, id)),
            Self::Firestore(store) => store.get(collection, id).await,
        }
    }

    /// Write `fields` into a document, creating it if needed.
    ///
    /// Fields not named in `fields` keep their stored values.
    pub async fn merge(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        match self {
            Self::Memory(store) => {
                store.merge(collection, id, fields);
                Ok(())
            }
            Self::Firestore(store) => store.merge(collection, id, fields).await,
        }
    }

    /// Backend name
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Firestore(_) => "firestore",
        }
    }
}
