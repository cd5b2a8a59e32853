//! Error types for the huecast binary.
//!
//! [`AppError`] is the top-level error type that wraps every failure
//! mode during startup and serving.

/// Top-level error for the huecast binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: huecast_core::ConfigError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: huecast_server::ServerError,
    },
}
