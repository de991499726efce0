use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Failures raised by a document store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("Invalid credentials file {}: {reason}", .path.display())]
    Credentials { path: PathBuf, reason: String },
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that are reported to HTTP callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InternalServerError(message) => {
                write!(f, "Status=500, InternalServerError: {}", message)
            }
            ApiError::BadRequest(message) => write!(f, "Status=400, BadRequest: {}", message),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::ApiError(e) => {
                warn!("{}", e);
                let status = e.status();
                match e {
                    ApiError::InternalServerError(message) | ApiError::BadRequest(message) => {
                        (status, message)
                    }
                }
            }
            other => {
                error!(%other, "Unhandled server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected Error".to_string(),
                )
            }
        };

        (status, axum::Json(MessageResponse { message })).into_response()
    }
}
