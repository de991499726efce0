use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};

/// Collection holding every user record accepted by the API.
pub const USERS_COLLECTION: &str = "users";

const MAX_COLLECTION_LEN: usize = 64;

/// A user as exchanged with API callers and persisted in the store.
///
/// Carries no identifier: the store assigns one on insert and it never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Build the schema-less document body written to the store.
    pub fn to_document(&self) -> CoreResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a record from a stored document.
    pub fn from_document(doc: &StoredDocument) -> CoreResult<Self> {
        serde_json::from_value(doc.data.clone()).map_err(|e| CoreError::MalformedDocument {
            id: doc.id,
            reason: e.to_string(),
        })
    }
}

/// Store-assigned document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Name of a collection inside the document store.
///
/// Names are 1-64 characters of ASCII alphanumerics, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection(String);

impl Collection {
    pub fn new(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.len() <= MAX_COLLECTION_LEN
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::InvalidCollection(name));
        }
        Ok(Self(name))
    }

    pub fn users() -> Self {
        Self(USERS_COLLECTION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as yielded by the store when listing a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub collection: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// What listing does when an item cannot be read or decoded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ListFailurePolicy {
    /// Discard partial results and report a server error.
    #[default]
    Fail,
    /// Stop at the bad item and return what was read before it.
    Truncate,
}
