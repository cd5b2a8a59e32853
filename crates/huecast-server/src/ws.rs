//! `WebSocket` push channel for color updates.
//!
//! Clients connect to `GET /ws`. Once the upgrade completes the
//! connection is registered with the broadcaster, which immediately
//! queues the current color; after that every accepted `set_color`
//! queues one more frame. Frames are sent as JSON text:
//!
//! ```json
//! {"type": "color-update", "data": {"r": 1.0, "g": 0.0, "b": 0.0}}
//! ```
//!
//! Anything the client sends is ignored. The connection ends when the
//! client closes, the transport errors, a send fails, or the broadcaster
//! drops the viewer for falling behind. In every case the viewer is
//! unregistered exactly once on the way out.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use huecast_core::{ConnectionHandle, FrameReceiver};
use huecast_types::ConnectionId;
use tracing::{debug, warn};

use crate::state::AppState;

/// Why a viewer's connection loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disconnect {
    /// Close frame received or stream ended.
    ClientClosed,
    /// Reading from the transport failed.
    TransportError,
    /// Writing to the transport failed.
    SendFailed,
    /// The broadcaster dropped this viewer's queue.
    Evicted,
}

/// Upgrade an HTTP request to a `WebSocket` push channel.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_color(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Register the viewer, pump its frames into the socket, and unregister
/// it when the connection ends.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let (handle, mut frames) = ConnectionHandle::channel(state.viewer_queue_capacity);
    let id = match state.broadcaster.register(handle).await {
        Ok(id) => id,
        Err(e) => {
            debug!(error = %e, "WebSocket viewer could not be registered");
            return;
        }
    };
    debug!(connection_id = %id, "WebSocket viewer connected");

    let reason = pump(&mut socket, &mut frames, id).await;

    state.broadcaster.unregister(id).await;
    debug!(connection_id = %id, ?reason, "WebSocket viewer disconnected");
}

async fn pump(socket: &mut WebSocket, frames: &mut FrameReceiver, id: ConnectionId) -> Disconnect {
    loop {
        tokio::select! {
            // Next queued frame for this viewer.
            frame = frames.recv() => {
                let Some(frame) = frame else {
                    if socket.send(Message::Close(None)).await.is_err() {
                        debug!(connection_id = %id, "close frame not delivered");
                    }
                    return Disconnect::Evicted;
                };
                let json = match frame.to_json() {
                    Ok(j) => j,
                    Err(e) => {
                        warn!(connection_id = %id, "Failed to serialize color frame: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    return Disconnect::SendFailed;
                }
            }
            // Inbound traffic: only closure matters.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => return Disconnect::ClientClosed,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return Disconnect::SendFailed;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(connection_id = %id, "WebSocket error: {e}");
                        return Disconnect::TransportError;
                    }
                    _ => {
                        // Text, binary and pong frames from viewers are ignored.
                    }
                }
            }
        }
    }
}
