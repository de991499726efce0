//! Roster - user records over a document store
//!
//! This crate provides a unified API for the roster service.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use roster::{build_router, AppState, MemoryDocumentStore};
//!
//! let app = build_router(Arc::new(AppState::new(Arc::new(MemoryDocumentStore::new()))));
//! ```

// Re-export server types
pub use roster_server::config::{Credentials, ServerConfig};
pub use roster_server::database::PgDocumentStore;
pub use roster_server::memory::MemoryDocumentStore;
pub use roster_server::{build_router, AppState, DocumentStore, ServerError, StoreError};

// Re-export core types that external applications may need
pub use roster_core::errors::CoreError;
pub use roster_core::models::{
    Collection, DocumentId, ListFailurePolicy, StoredDocument, UserRecord, USERS_COLLECTION,
};
pub use roster_core::validation::ValidationError;
