//! Error types for the huecast HTTP API.
//!
//! [`ApiError`] covers every failure a request can see and converts into
//! an Axum response via its [`IntoResponse`] implementation. Connection
//! errors on the push channel never reach this type; they are absorbed
//! by the broadcaster.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use huecast_types::ColorError;

/// Errors that can occur in the HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submitted color failed channel validation.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorError),

    /// The request body was not a `{r, g, b}` JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No route matched.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidColor(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
