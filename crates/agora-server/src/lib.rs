//! HTTP server for Agora.
//!
//! Serves the JSON API under `/api` over a single process-wide entity store,
//! and optionally the static browser client for every other path.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::AgoraServer;
pub use state::AppState;
