//! REST endpoints for user records.
//!
//! ```text
//! POST /users {"name":"Ann","email":"a@x.com","age":30}
//! GET  /users
//! ```
use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use futures_util::StreamExt;
use roster_core::{Collection, ListFailurePolicy, UserRecord};

use crate::errors::{ApiError, MessageResponse, ServerResult};
use crate::AppState;

pub const USER_ADDED: &str = "User added successfully";
pub const ADD_USER_FAILED: &str = "Failed to add user";
pub const LIST_USERS_FAILED: &str = "Failed to list users";

/// Store one user record in the `users` collection.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// every decode failure, including a missing content type, is a 400.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<impl IntoResponse> {
    let user: UserRecord = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(%e, "Rejected user payload");
        ApiError::bad_request(e.to_string())
    })?;

    if state.validate {
        user.validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
    }

    let document = user.to_document().map_err(|e| {
        tracing::error!(%e, "Failed to encode user document");
        ApiError::internal(ADD_USER_FAILED)
    })?;

    let id = state
        .store
        .add(&Collection::users(), document)
        .await
        .map_err(|e| {
            tracing::error!(%e, "Failed to add user");
            ApiError::internal(ADD_USER_FAILED)
        })?;

    tracing::debug!(%id, "User added");
    Ok((StatusCode::CREATED, Json(MessageResponse::new(USER_ADDED))))
}

/// Return every user record in store order.
pub async fn list_users(State(state): State<Arc<AppState>>) -> ServerResult<Json<Vec<UserRecord>>> {
    let collection = Collection::users();
    let mut documents = state.store.list(&collection);
    let mut users = Vec::new();

    while let Some(item) = documents.next().await {
        let decoded = match item {
            Ok(doc) => UserRecord::from_document(&doc).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match decoded {
            Ok(user) => users.push(user),
            Err(reason) => match state.list_failure_policy {
                ListFailurePolicy::Truncate => {
                    tracing::warn!(%reason, returned = users.len(), "Listing stopped early");
                    break;
                }
                ListFailurePolicy::Fail => {
                    tracing::error!(%reason, read = users.len(), "Failed to list users");
                    return Err(ApiError::internal(LIST_USERS_FAILED).into());
                }
            },
        }
    }

    Ok(Json(users))
}

pub async fn health() -> &'static str {
    "OK"
}
