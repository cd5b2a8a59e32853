//! HTTP and WebSocket surface for huecast.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) pushing a `color-update` frame on
//!   connect and after every accepted color change
//! - **REST endpoints** to read (`GET /color`) and replace
//!   (`POST /set_color`) the shared color, plus `GET /status`
//! - **Minimal HTML page** (`GET /`) showing the current color and the
//!   number of connected viewers
//!
//! # Architecture
//!
//! Handlers share one [`AppState`] holding the core
//! [`Broadcaster`](huecast_core::Broadcaster), which owns the state store
//! and the registry of open viewer connections. Nothing here is global;
//! the binary builds the state once and injects it into the router.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
