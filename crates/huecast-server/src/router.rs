//! Axum router construction for the huecast server.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS open to any origin, so a color picker served from anywhere
//! can drive it.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /color` -- current color
/// - `POST /set_color` -- replace and broadcast the color
/// - `GET /status` -- current color and viewer count
/// - `GET /ws` -- `WebSocket` push channel
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/color", get(handlers::get_color))
        .route("/set_color", post(handlers::set_color))
        .route("/status", get(handlers::status))
        .route("/ws", get(ws::ws_color))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
