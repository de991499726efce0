pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod memory;
pub mod queries;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use roster_core::ListFailurePolicy;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use errors::{ApiError, ServerError, ServerResult, StoreError, StoreResult};
pub use store::{DocumentStore, DocumentStream};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub list_failure_policy: ListFailurePolicy,
    pub validate: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            list_failure_policy: ListFailurePolicy::default(),
            validate: false,
        }
    }

    pub fn with_list_failure_policy(mut self, policy: ListFailurePolicy) -> Self {
        self.list_failure_policy = policy;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(api::create_user).get(api::list_users))
        .route("/health", get(api::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::new(Arc::new(MemoryDocumentStore::new()));
        assert_eq!(state.list_failure_policy, ListFailurePolicy::Fail);
        assert!(!state.validate);

        let state = state
            .with_list_failure_policy(ListFailurePolicy::Truncate)
            .with_validation(true);
        assert_eq!(state.list_failure_policy, ListFailurePolicy::Truncate);
        assert!(state.validate);
    }
}
