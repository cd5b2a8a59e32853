//! Connection registry and fan-out.
//!
//! The [`Broadcaster`] owns every open [`ConnectionHandle`] and pushes
//! each stored color to all of them. Fan-out iterates a snapshot of the
//! registry so removals caused by failed sends never disturb the
//! iteration. A failure on one handle only removes that handle; nothing
//! is reported to whoever set the color.
//!
//! [`Broadcaster::publish`] and [`Broadcaster::register`] take a shared
//! sequencing lock:
//!
//! - two publishes queue their frames in the same order they stored
//!   their colors, so every viewer sees sequential updates in order;
//! - a registering viewer reads the current color and joins the registry
//!   without a publish landing in between, so it never misses an update.

use std::collections::HashMap;
use std::sync::Arc;

use huecast_types::{ColorError, ColorFrame, ColorValue, ConnectionId};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::connection::{ConnectionHandle, DeliveryError};
use crate::store::StateStore;

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Handles the frame was queued for.
    pub delivered: usize,
    /// Handles that failed and were unregistered.
    pub dropped: usize,
}

/// Registry of live viewer connections plus the fan-out logic.
#[derive(Debug)]
pub struct Broadcaster {
    store: Arc<StateStore>,
    viewers: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
    sequencer: Mutex<()>,
}

impl Broadcaster {
    /// Create an empty registry backed by `store`.
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            viewers: RwLock::new(HashMap::new()),
            sequencer: Mutex::new(()),
        }
    }

    /// The state store this broadcaster publishes from.
    pub const fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Open `handle` and add it to the registry, first queueing the
    /// current color for it.
    ///
    /// If that first frame cannot be queued the handle is closed and never
    /// enters the registry.
    pub async fn register(
        &self,
        mut handle: ConnectionHandle,
    ) -> Result<ConnectionId, DeliveryError> {
        let _turn = self.sequencer.lock().await;
        let id = handle.id();
        let current = self.store.get().await;

        if let Err(e) = handle.deliver(ColorFrame::from(current)) {
            handle.close();
            debug!(
                connection_id = %id,
                error = %e,
                "initial frame failed, viewer not registered"
            );
            return Err(e);
        }

        handle.open();
        let mut viewers = self.viewers.write().await;
        viewers.insert(id, handle);
        debug!(connection_id = %id, viewers = viewers.len(), "viewer registered");
        Ok(id)
    }

    /// Remove a handle. Returns `false` if it was already gone.
    pub async fn unregister(&self, id: ConnectionId) -> bool {
        let mut viewers = self.viewers.write().await;
        match viewers.remove(&id) {
            Some(mut handle) => {
                handle.close();
                debug!(connection_id = %id, viewers = viewers.len(), "viewer unregistered");
                true
            }
            None => false,
        }
    }

    /// Queue `color` for every registered handle.
    ///
    /// Handles whose send fails are unregistered. Never waits on a viewer
    /// and never retries.
    pub async fn broadcast(&self, color: ColorValue) -> BroadcastReport {
        let frame = ColorFrame::from(color);
        let snapshot: Vec<ConnectionHandle> =
            self.viewers.read().await.values().cloned().collect();

        let failed: Vec<(ConnectionId, DeliveryError)> = snapshot
            .iter()
            .filter_map(|handle| handle.deliver(frame).err().map(|e| (handle.id(), e)))
            .collect();

        for (id, error) in &failed {
            debug!(connection_id = %id, %error, "dropping viewer after failed send");
            self.unregister(*id).await;
        }

        BroadcastReport {
            delivered: snapshot.len().saturating_sub(failed.len()),
            dropped: failed.len(),
        }
    }

    /// Store `color` and broadcast it.
    ///
    /// Validation errors are returned before anything is broadcast.
    /// Delivery failures are absorbed.
    pub async fn publish(&self, color: ColorValue) -> Result<ColorValue, ColorError> {
        let _turn = self.sequencer.lock().await;
        let stored = self.store.set(color).await?;
        let report = self.broadcast(stored).await;
        info!(
            r = stored.r,
            g = stored.g,
            b = stored.b,
            delivered = report.delivered,
            dropped = report.dropped,
            "color published"
        );
        Ok(stored)
    }

    /// Number of registered viewers.
    pub async fn viewer_count(&self) -> usize {
        self.viewers.read().await.len()
    }

    /// Whether `id` is currently registered.
    pub async fn is_registered(&self, id: ConnectionId) -> bool {
        self.viewers.read().await.contains_key(&id)
    }
}
