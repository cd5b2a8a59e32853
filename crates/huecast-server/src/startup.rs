//! Background-task startup helper.
//!
//! [`spawn_server`] binds eagerly, so address problems surface to the
//! caller, then serves on a Tokio task. Binding to port `0` and reading
//! back the returned address is how the integration tests get a live
//! server.
//!
//! # Usage
//!
//! ```rust,ignore
//! use huecast_server::{AppState, ServerConfig, spawn_server};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::default());
//! let (addr, handle) = spawn_server(&ServerConfig::default(), state).await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Bind `config` and serve on a background task.
///
/// Returns the bound address and the task handle. The server runs until
/// the task is aborted or the runtime shuts down.
pub async fn spawn_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<(SocketAddr, JoinHandle<()>), StartupError> {
    let listener = crate::server::bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("listener has no local address: {e}")))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::serve(listener, state, std::future::pending()).await {
            tracing::error!(error = %e, "huecast server exited with error");
        }
    });

    tracing::info!(%addr, "huecast server spawned on background task");

    Ok((addr, handle))
}
