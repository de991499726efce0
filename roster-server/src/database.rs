use async_trait::async_trait;
use futures_util::StreamExt;
use roster_core::{Collection, DocumentId};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::errors::StoreResult;
use crate::queries::{self, parse_document, Queries};
use crate::store::{DocumentStore, DocumentStream};

/// Document store kept in PostgreSQL.
///
/// Every document is a JSONB row in `documents`, partitioned by the
/// project namespace and the collection name.
pub struct PgDocumentStore {
    pub pool: PgPool,
    namespace: String,
}

impl PgDocumentStore {
    pub async fn new(
        database_url: &str,
        namespace: impl Into<String>,
        max_connections: u32,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::from_pool(pool, namespace))
    }

    pub fn from_pool(pool: PgPool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }

    pub async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn count(&self, collection: &Collection) -> StoreResult<u64> {
        queries::count_documents(&self.pool, &self.namespace, collection).await
    }

    /// Remove every document of this store's namespace.
    pub async fn clear_namespace(&self) -> StoreResult<u64> {
        let result = sqlx::query(Queries::DELETE_NAMESPACE)
            .bind(&self.namespace)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn add(
        &self,
        collection: &Collection,
        document: serde_json::Value,
    ) -> StoreResult<DocumentId> {
        let row = sqlx::query(Queries::INSERT_DOCUMENT)
            .bind(&self.namespace)
            .bind(collection.as_str())
            .bind(document)
            .fetch_one(&self.pool)
            .await?;

        Ok(DocumentId(row.try_get("id")?))
    }

    fn list<'a>(&'a self, collection: &Collection) -> DocumentStream<'a> {
        sqlx::query(Queries::LIST_DOCUMENTS)
            .bind(self.namespace.as_str())
            .bind(collection.as_str().to_owned())
            .fetch(&self.pool)
            .map(|row| parse_document(&row?))
            .boxed()
    }

    async fn close(&self) {
        tracing::info!(namespace = %self.namespace, "Closing document store pool");
        self.pool.close().await;
    }
}
