//! Messages exchanged with viewers and setters.
//!
//! [`ColorFrame`] is the only frame the push channel carries. It is
//! adjacently tagged so the wire shape is
//! `{"type": "color-update", "data": {"r": .., "g": .., "b": ..}}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::color::ColorValue;

/// A frame pushed to every connected viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "data")]
#[ts(export, export_to = "bindings/")]
pub enum ColorFrame {
    /// The current color changed (or is being sent on connect).
    #[serde(rename = "color-update")]
    ColorUpdate(ColorValue),
}

impl ColorFrame {
    /// The color carried by this frame.
    pub const fn color(&self) -> ColorValue {
        match self {
            Self::ColorUpdate(color) => *color,
        }
    }

    /// Encode as JSON text for a WebSocket text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<ColorValue> for ColorFrame {
    fn from(color: ColorValue) -> Self {
        Self::ColorUpdate(color)
    }
}

/// Status marker in a [`SetColorResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SetColorStatus {
    /// The color was stored and broadcast.
    Ok,
}

/// Acknowledgment returned by `POST /set_color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SetColorResponse {
    /// Always [`SetColorStatus::Ok`] on success.
    pub status: SetColorStatus,
    /// The now-current color.
    pub color: ColorValue,
}

impl SetColorResponse {
    /// Acknowledge a stored color.
    pub const fn ok(color: ColorValue) -> Self {
        Self {
            status: SetColorStatus::Ok,
            color,
        }
    }
}
