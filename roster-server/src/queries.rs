use roster_core::{Collection, DocumentId, StoredDocument};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::errors::StoreResult;

/// SQL used by the PostgreSQL document store
pub struct Queries;

impl Queries {
    pub const INSERT_DOCUMENT: &'static str = r#"
        INSERT INTO documents (namespace, collection, data)
        VALUES ($1, $2, $3)
        RETURNING id
    "#;

    // Ties on created_at fall back to id so repeated listings agree
    pub const LIST_DOCUMENTS: &'static str = r#"
        SELECT id, collection, data, created_at
        FROM documents
        WHERE namespace = $1 AND collection = $2
        ORDER BY created_at ASC, id ASC
    "#;

    pub const COUNT_DOCUMENTS: &'static str = r#"
        SELECT COUNT(*) as total
        FROM documents
        WHERE namespace = $1 AND collection = $2
    "#;

    pub const DELETE_NAMESPACE: &'static str = r#"
        DELETE FROM documents
        WHERE namespace = $1
    "#;
}

/// Parse a stored document from a database row
pub fn parse_document(row: &PgRow) -> StoreResult<StoredDocument> {
    Ok(StoredDocument {
        id: DocumentId(row.try_get("id")?),
        collection: row.try_get("collection")?,
        data: row.try_get("data")?,
        created_at: row.try_get::<chrono::DateTime<chrono::Utc>, _>("created_at")?,
    })
}

/// Number of documents currently held in a collection
pub async fn count_documents(
    pool: &PgPool,
    namespace: &str,
    collection: &Collection,
) -> StoreResult<u64> {
    let row = sqlx::query(Queries::COUNT_DOCUMENTS)
        .bind(namespace)
        .bind(collection.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("total")? as u64)
}
