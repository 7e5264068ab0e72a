use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use ember_store::{spawn_sweeper, DropVault, FsBlobSink, MemoryDropStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The Ember drop server.
pub struct EmberServer {
    config: ServerConfig,
}

impl EmberServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the shared state: in-memory store plus a filesystem blob
    /// sink under `{data_dir}/blobs`.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let store = Arc::new(MemoryDropStore::new());
        let sink = Arc::new(FsBlobSink::new(self.config.data_dir.join("blobs"))?);
        let vault = Arc::new(DropVault::new(store, sink));
        Ok(AppState {
            vault,
            max_upload_bytes: self.config.max_upload_bytes,
        })
    }

    /// Start serving requests, with the retention sweeper running in the
    /// background.
    pub async fn serve(self) -> ServerResult<()> {
        let state = self.build_state()?;

        if self.config.sweep_interval_secs > 0 {
            spawn_sweeper(
                state.vault.clone(),
                Duration::from_secs(self.config.sweep_interval_secs),
            );
        } else {
            tracing::warn!("retention sweeper disabled; expired drops are only removed on access");
        }

        let app = build_router(state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("ember server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = EmberServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:7655".parse().unwrap()
        );
    }

    #[test]
    fn state_builds_with_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = EmberServer::new(config).build_state().unwrap();
        assert_eq!(state.max_upload_bytes, 100 * 1024 * 1024);
        assert!(dir.path().join("blobs").exists());
    }
}
