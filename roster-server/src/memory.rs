use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::{stream, StreamExt};
use roster_core::{Collection, DocumentId, StoredDocument};

use crate::errors::StoreResult;
use crate::store::{DocumentStore, DocumentStream};

/// Process-local document store.
///
/// Used by `--in-memory` and by tests. Listing takes a snapshot of the
/// collection, so writes that land mid-iteration are not observed.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<DashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: &Collection) -> usize {
        self.collections
            .get(collection.as_str())
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &Collection) -> bool {
        self.len(collection) == 0
    }

    fn snapshot(&self, collection: &Collection) -> Vec<StoredDocument> {
        self.collections
            .get(collection.as_str())
            .map(|docs| docs.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add(
        &self,
        collection: &Collection,
        document: serde_json::Value,
    ) -> StoreResult<DocumentId> {
        let id = DocumentId::new();
        self.collections
            .entry(collection.as_str().to_string())
            .or_default()
            .push(StoredDocument {
                id,
                collection: collection.as_str().to_string(),
                data: document,
                created_at: chrono::Utc::now(),
            });
        tracing::trace!(%id, %collection, "Stored document in memory");
        Ok(id)
    }

    fn list<'a>(&'a self, collection: &Collection) -> DocumentStream<'a> {
        stream::iter(self.snapshot(collection).into_iter().map(Ok)).boxed()
    }
}
