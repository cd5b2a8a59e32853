//! Per-viewer push channel and its lifecycle.
//!
//! A [`ConnectionHandle`] is the registry's side of one viewer: an
//! identity, a lifecycle state, and the sending half of a bounded frame
//! queue. The viewer's connection task owns the matching
//! [`FrameReceiver`] and drains it into the transport in FIFO order,
//! which is what keeps per-viewer delivery ordered.
//!
//! Queueing never waits. A full queue means the viewer is not keeping up
//! and is treated like a failed send.

use huecast_types::{ColorFrame, ConnectionId};
use tokio::sync::mpsc;
use tracing::trace;

/// Receiving half of a viewer's frame queue.
pub type FrameReceiver = mpsc::Receiver<ColorFrame>;

/// Lifecycle of a [`ConnectionHandle`].
///
/// Transitions only move forward: `Connecting -> Open -> Closed`, or
/// `Connecting -> Closed` when the first send fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake done, initial frame not yet queued.
    Connecting,
    /// Registered and receiving broadcasts.
    Open,
    /// Transport gone or a send failed. Terminal.
    Closed,
}

/// Why a frame could not be queued for a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The connection task dropped its receiver (transport closed).
    #[error("viewer connection closed")]
    Closed,

    /// The viewer's queue is full.
    #[error("viewer queue full ({capacity} frames pending)")]
    Backlogged {
        /// Queue capacity that was exhausted.
        capacity: usize,
    },
}

/// One viewer's push channel as seen by the registry.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::Sender<ColorFrame>,
    state: ConnectionState,
}

impl ConnectionHandle {
    /// Create a handle in the `Connecting` state with a queue of
    /// `capacity` frames, returning the receiver for the connection task.
    ///
    /// A capacity of zero is raised to one.
    pub fn channel(capacity: usize) -> (Self, FrameReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = Self {
            id: ConnectionId::new(),
            tx,
            state: ConnectionState::Connecting,
        };
        (handle, rx)
    }

    /// This connection's identity.
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Queue a frame without waiting.
    ///
    /// Fails with [`DeliveryError::Closed`] once the handle is closed,
    /// even if the receiver still exists.
    pub fn deliver(&self, frame: ColorFrame) -> Result<(), DeliveryError> {
        if self.state == ConnectionState::Closed {
            return Err(DeliveryError::Closed);
        }
        self.tx.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
            mpsc::error::TrySendError::Full(_) => DeliveryError::Backlogged {
                capacity: self.tx.max_capacity(),
            },
        })
    }

    /// `Connecting -> Open`. No effect in any other state.
    pub(crate) fn open(&mut self) {
        if self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Open;
            trace!(connection_id = %self.id, "connection open");
        }
    }

    /// Move to `Closed`. Idempotent.
    pub(crate) fn close(&mut self) {
        if self.state != ConnectionState::Closed {
            self.state = ConnectionState::Closed;
            trace!(connection_id = %self.id, "connection closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use huecast_types::ColorValue;

    use super::*;

    #[test]
    fn new_handle_is_connecting() {
        let (handle, _rx) = ConnectionHandle::channel(4);
        assert_eq!(handle.state(), ConnectionState::Connecting);
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        let (mut handle, _rx) = ConnectionHandle::channel(4);
        handle.open();
        assert_eq!(handle.state(), ConnectionState::Open);
        handle.close();
        assert_eq!(handle.state(), ConnectionState::Closed);
        handle.open();
        assert_eq!(handle.state(), ConnectionState::Closed);
    }

    #[test]
    fn deliver_queues_in_order() {
        let (handle, mut rx) = ConnectionHandle::channel(4);
        assert!(handle.deliver(ColorValue::BLACK.into()).is_ok());
        assert!(handle.deliver(ColorValue::WHITE.into()).is_ok());
        assert_eq!(rx.try_recv().ok(), Some(ColorValue::BLACK.into()));
        assert_eq!(rx.try_recv().ok(), Some(ColorValue::WHITE.into()));
    }

    #[test]
    fn dropped_receiver_is_closed() {
        let (handle, rx) = ConnectionHandle::channel(4);
        drop(rx);
        assert_eq!(
            handle.deliver(ColorValue::BLACK.into()),
            Err(DeliveryError::Closed)
        );
    }

    #[test]
    fn full_queue_is_backlogged() {
        let (handle, _rx) = ConnectionHandle::channel(1);
        assert!(handle.deliver(ColorValue::BLACK.into()).is_ok());
        assert_eq!(
            handle.deliver(ColorValue::WHITE.into()),
            Err(DeliveryError::Backlogged { capacity: 1 })
        );
    }

    #[test]
    fn closed_handle_refuses_frames() {
        let (mut handle, _rx) = ConnectionHandle::channel(4);
        handle.close();
        assert_eq!(
            handle.deliver(ColorValue::BLACK.into()),
            Err(DeliveryError::Closed)
        );
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let (handle, _rx) = ConnectionHandle::channel(0);
        assert!(handle.deliver(ColorValue::BLACK.into()).is_ok());
    }
}
