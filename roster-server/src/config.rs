use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use roster_core::ListFailurePolicy;
use serde::Deserialize;

use crate::database::PgDocumentStore;
use crate::errors::{ServerError, ServerResult};
use crate::memory::MemoryDocumentStore;
use crate::store::DocumentStore;

pub const DEFAULT_PROJECT_ID: &str = "default";

/// Command line and environment configuration for the server.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster-server", version, about = "User record service over a document store")]
pub struct ServerConfig {
    /// JSON credentials file holding the store connection details
    #[arg(long, env = "ROSTER_CREDENTIALS", default_value = "serviceAccountKey.json")]
    pub credentials: PathBuf,

    /// Project namespace; overrides the one in the credentials file
    #[arg(long, env = "ROSTER_PROJECT_ID")]
    pub project_id: Option<String>,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    pub bind: String,

    #[arg(long, env = "ROSTER_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// What GET /users does when a stored document cannot be read
    #[arg(long, env = "ROSTER_LIST_FAILURE_POLICY", default_value_t = ListFailurePolicy::Fail)]
    pub list_failure_policy: ListFailurePolicy,

    /// Reject blank names, malformed emails and out-of-range ages
    #[arg(long, env = "ROSTER_VALIDATE")]
    pub validate: bool,

    /// Keep documents in process memory instead of connecting to a store
    #[arg(long, env = "ROSTER_IN_MEMORY")]
    pub in_memory: bool,
}

/// Contents of the credentials file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub database_url: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl Credentials {
    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ServerError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ServerError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ServerConfig {
    /// Flag or env first, then the credentials file, then the default.
    pub fn resolve_project_id(&self, credentials: Option<&Credentials>) -> String {
        self.project_id
            .clone()
            .or_else(|| credentials.and_then(|c| c.project_id.clone()))
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string())
    }

    /// Build the store handle shared by every request.
    pub async fn connect_store(&self) -> ServerResult<Arc<dyn DocumentStore>> {
        if self.in_memory {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            return Ok(Arc::new(MemoryDocumentStore::new()));
        }

        let credentials = Credentials::from_file(&self.credentials)?;
        let project_id = self.resolve_project_id(Some(&credentials));

        let store =
            PgDocumentStore::new(&credentials.database_url, &project_id, self.max_connections)
                .await?;
        store.run_migrations().await?;

        tracing::info!(project_id = %project_id, "Connected to document store");
        Ok(Arc::new(store))
    }
}
