//! In-memory document store

use super::Document;
use dashmap::DashMap;

/// Documents keyed by `(collection, id)`
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: DashMap<(String, String), Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.documents
            .get(&(collection.to_string(), id.to_string()))
            .map(|doc| doc.value().clone())
    }

    pub fn merge(&self, collection: &str, id: &str, fields: Document) {
        let mut doc = self
            .documents
            .entry((collection.to_string(), id.to_string()))
            .or_default();
        for (key, value) in fields {
            doc.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
