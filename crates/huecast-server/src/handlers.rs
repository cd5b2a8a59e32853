//! REST endpoint handlers for the huecast server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/color` | Current color |
//! | `POST` | `/set_color` | Replace the color and broadcast it |
//! | `GET` | `/status` | Current color and viewer count |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use axum::Json;
use huecast_types::{ColorValue, SetColorResponse};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for `GET /status`.
#[derive(Debug, serde::Serialize)]
pub struct StatusResponse {
    /// The current color.
    pub color: ColorValue,
    /// Number of open push channels.
    pub viewers: usize,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the current color and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let color = state.store().get().await;
    let viewers = state.broadcaster.viewer_count().await;
    let hex = color.to_hex();
    let (r, g, b) = (color.r, color.g, color.b);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>huecast</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; }}
        .swatch {{
            width: 150px;
            height: 150px;
            border-radius: 12px;
            border: 1px solid #30363d;
            background: {hex};
        }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>huecast</h1>
    <div class="swatch"></div>
    <p>{hex} (r={r:.2}, g={g:.2}, b={b:.2})</p>
    <p>Viewers connected: {viewers}</p>
    <ul>
        <li>GET <a href="/color">/color</a></li>
        <li>POST /set_color</li>
        <li>GET <a href="/status">/status</a></li>
        <li>WS /ws</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Color endpoints
// ---------------------------------------------------------------------------

/// Return the current color.
pub async fn get_color(State(state): State<Arc<AppState>>) -> Json<ColorValue> {
    Json(state.store().get().await)
}

/// Validate, store and broadcast a new color.
///
/// Malformed bodies and out-of-range channels are rejected with `400`
/// and leave the current color unchanged.
pub async fn set_color(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ColorValue>, JsonRejection>,
) -> Result<Json<SetColorResponse>, ApiError> {
    let Json(color) = payload?;
    let stored = state
        .broadcaster
        .publish(color)
        .await
        .inspect_err(|e| debug!(error = %e, "color rejected"))?;
    Ok(Json(SetColorResponse::ok(stored)))
}

/// Return the current color and viewer count.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        color: state.store().get().await,
        viewers: state.broadcaster.viewer_count().await,
    })
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_owned())
}
