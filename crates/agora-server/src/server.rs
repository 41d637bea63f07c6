use tokio::net::TcpListener;

use agora_store::{seed, InMemoryEntityStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The Agora HTTP server.
pub struct AgoraServer {
    config: ServerConfig,
    state: AppState,
}

impl AgoraServer {
    /// Create a server, loading the sample data if the config asks for it.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = if config.seed {
            seed::sample_store()?
        } else {
            InMemoryEntityStore::new()
        };
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: ServerConfig, store: InMemoryEntityStore) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            static_dir = ?self.config.static_dir,
            "Agora server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
