//! Application state

use std::sync::Arc;

use filegen_core::agent::{AgentClientConfig, AgentStreamClient};
use filegen_core::store::FileStore;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    file_store: FileStore,
    agent_client: AgentStreamClient,
}

impl AppState {
    /// Create the state, initializing the artifact directory
    pub async fn new(config: ServerConfig) -> filegen_core::Result<Self> {
        let file_store = FileStore::init(config.artifact_dir.clone()).await?;
        let agent_client = AgentStreamClient::new(AgentClientConfig {
            timeout: config.agent_timeout,
        });

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                file_store,
                agent_client,
            }),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get reference to the artifact store
    pub fn file_store(&self) -> &FileStore {
        &self.inner.file_store
    }

    /// Get reference to the upstream agent client
    pub fn agent_client(&self) -> &AgentStreamClient {
        &self.inner.agent_client
    }
}
