//! Core state synchronization for huecast.
//!
//! Three pieces, each constructed once at process start and shared by
//! reference:
//!
//! - [`store::StateStore`] -- the single current [`ColorValue`] with
//!   atomic read and replace
//! - [`connection::ConnectionHandle`] -- one viewer's push channel and its
//!   `Connecting -> Open -> Closed` lifecycle
//! - [`broadcaster::Broadcaster`] -- the registry of open handles and the
//!   fan-out of every stored color to all of them
//!
//! [`config`] holds the typed `huecast-config.yaml` loader.
//!
//! [`ColorValue`]: huecast_types::ColorValue

pub mod broadcaster;
pub mod config;
pub mod connection;
pub mod store;

pub use broadcaster::{BroadcastReport, Broadcaster};
pub use config::{ConfigError, HuecastConfig};
pub use connection::{ConnectionHandle, ConnectionState, DeliveryError, FrameReceiver};
pub use store::StateStore;
