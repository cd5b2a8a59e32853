//! Shared type definitions for huecast.
//!
//! Everything that crosses a crate or process boundary lives here: the
//! color value itself, the frames pushed to viewers, the REST response
//! shapes, and connection identifiers. Wire types derive `ts-rs` so the
//! browser client can consume generated `TypeScript` definitions.
//!
//! # Modules
//!
//! - [`color`] -- [`ColorValue`] and channel validation
//! - [`frame`] -- Push-channel frames and REST payloads
//! - [`ids`] -- Connection identifiers

pub mod color;
pub mod frame;
pub mod ids;

pub use color::{Channel, ColorError, ColorValue};
pub use frame::{ColorFrame, SetColorResponse, SetColorStatus};
pub use ids::ConnectionId;
