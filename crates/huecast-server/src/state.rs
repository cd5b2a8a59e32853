//! Shared application state for the huecast server.
//!
//! [`AppState`] wraps the core [`Broadcaster`] (which in turn owns the
//! [`StateStore`]) together with the per-viewer queue size used when a
//! new push channel is opened.

use std::sync::Arc;

use huecast_core::config::BroadcastConfig;
use huecast_core::{Broadcaster, HuecastConfig, StateStore};
use huecast_types::ColorValue;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registry of viewer connections and fan-out of color updates.
    pub broadcaster: Arc<Broadcaster>,
    /// Queue capacity for each new viewer connection.
    pub viewer_queue_capacity: usize,
}

impl AppState {
    /// Create state around an existing broadcaster.
    pub const fn new(broadcaster: Arc<Broadcaster>, viewer_queue_capacity: usize) -> Self {
        Self {
            broadcaster,
            viewer_queue_capacity,
        }
    }

    /// Create state starting from `initial` with the configured default
    /// queue size.
    pub fn with_color(initial: ColorValue) -> Self {
        let store = Arc::new(StateStore::new(initial));
        Self::new(
            Arc::new(Broadcaster::new(store)),
            BroadcastConfig::default().viewer_queue_capacity,
        )
    }

    /// Build state from loaded configuration.
    pub fn from_config(config: &HuecastConfig) -> Self {
        let store = Arc::new(StateStore::new(config.color.initial));
        Self::new(
            Arc::new(Broadcaster::new(store)),
            config.broadcast.viewer_queue_capacity,
        )
    }

    /// The state store behind the broadcaster.
    pub fn store(&self) -> &StateStore {
        self.broadcaster.store()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_color(ColorValue::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_state_matches_default_config() {
        let state = AppState::default();
        let config = HuecastConfig::default();
        assert_eq!(
            state.viewer_queue_capacity,
            config.broadcast.viewer_queue_capacity
        );
        assert_eq!(state.store().get().await, config.color.initial);
    }

    #[tokio::test]
    async fn from_config_uses_configured_values() {
        let mut config = HuecastConfig::default();
        config.broadcast.viewer_queue_capacity = 3;
        config.color.initial = ColorValue::BLACK;

        let state = AppState::from_config(&config);
        assert_eq!(state.viewer_queue_capacity, 3);
        assert_eq!(state.store().get().await, ColorValue::BLACK);
    }
}
