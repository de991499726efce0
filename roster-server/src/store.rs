use async_trait::async_trait;
use futures_util::stream::BoxStream;
use roster_core::{Collection, DocumentId, StoredDocument};

use crate::errors::StoreResult;

/// Lazily produced documents of one collection, in store order.
pub type DocumentStream<'a> = BoxStream<'a, StoreResult<StoredDocument>>;

/// Client handle for a schema-less document store.
///
/// One instance is built at startup and shared by every request, so
/// implementations must be safe for concurrent use.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document to `collection` and return the identifier the
    /// store assigned to it.
    async fn add(
        &self,
        collection: &Collection,
        document: serde_json::Value,
    ) -> StoreResult<DocumentId>;

    /// Stream every document in `collection`.
    ///
    /// The stream ends at end-of-collection. A read failure is yielded as an
    /// `Err` item; callers decide whether to keep going.
    fn list<'a>(&'a self, collection: &Collection) -> DocumentStream<'a>;

    /// Release connections held by the store.
    async fn close(&self) {}
}
