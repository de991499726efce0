use crate::models::DocumentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed document {id}: {reason}")]
    MalformedDocument { id: DocumentId, reason: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
