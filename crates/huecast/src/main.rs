//! huecast binary.
//!
//! Keeps one shared color in memory and pushes every change to all
//! connected viewers.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `huecast-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the state store and broadcaster
//! 4. Serve HTTP + `WebSocket` until `Ctrl-C`

mod error;

use std::path::Path;
use std::sync::Arc;

use huecast_core::HuecastConfig;
use huecast_server::{AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const CONFIG_FILE: &str = "huecast-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server cannot
/// bind.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so report the source after init.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config_file = from_file.then_some(CONFIG_FILE),
        host = config.server.host,
        port = config.server.port,
        viewer_queue_capacity = config.broadcast.viewer_queue_capacity,
        initial_color = %config.color.initial.to_hex(),
        "huecast starting"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::from_config(&config));

    // 4. Serve.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    huecast_server::start_server(&server_config, state).await?;

    info!("huecast shutdown complete");
    Ok(())
}

/// Load configuration from `huecast-config.yaml` in the working directory,
/// falling back to defaults when the file does not exist.
fn load_config() -> Result<(HuecastConfig, bool), AppError> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Ok((HuecastConfig::from_file(path)?, true))
    } else {
        Ok((HuecastConfig::from_env()?, false))
    }
}
