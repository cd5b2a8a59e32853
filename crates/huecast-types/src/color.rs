//! The shared color value and its channel validation.
//!
//! A [`ColorValue`] is three independent floating-point channels, each in
//! the closed range `[0.0, 1.0]`. It has no identity beyond its value and
//! is always replaced whole, never merged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Errors raised when a color fails channel validation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// A channel is outside `[0.0, 1.0]`.
    #[error("channel `{channel}` must be within [0.0, 1.0], got {value}")]
    OutOfRange {
        /// The offending channel.
        channel: Channel,
        /// The rejected value.
        value: f64,
    },

    /// A channel is NaN or infinite.
    #[error("channel `{channel}` must be a finite number")]
    NotFinite {
        /// The offending channel.
        channel: Channel,
    },
}

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
}

impl Channel {
    /// All channels in wire order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// The JSON field name of this channel.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// The synchronized three-channel color.
///
/// Deserialization only checks shape (all three fields present and
/// numeric). Range checks happen in [`ColorValue::check`] so callers can
/// report a precise [`ColorError`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColorValue {
    /// Red channel.
    #[validate(range(min = 0.0, max = 1.0))]
    pub r: f64,
    /// Green channel.
    #[validate(range(min = 0.0, max = 1.0))]
    pub g: f64,
    /// Blue channel.
    #[validate(range(min = 0.0, max = 1.0))]
    pub b: f64,
}

impl ColorValue {
    /// Opaque white, the value a fresh process starts with.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Build a color, rejecting any channel outside `[0.0, 1.0]`.
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self, ColorError> {
        let color = Self { r, g, b };
        color.check()?;
        Ok(color)
    }

    /// Value of a single channel.
    pub const fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Verify every channel is finite and within `[0.0, 1.0]`.
    ///
    /// Channels are checked in `r`, `g`, `b` order and the first failure
    /// is reported.
    pub fn check(&self) -> Result<(), ColorError> {
        // Range validation lets NaN through.
        if let Some(channel) = Channel::ALL
            .into_iter()
            .find(|c| !self.channel(*c).is_finite())
        {
            return Err(ColorError::NotFinite { channel });
        }

        self.validate().map_err(|errors| {
            let fields = errors.field_errors();
            let channel = Channel::ALL
                .into_iter()
                .find(|c| fields.contains_key(c.field_name()))
                .unwrap_or(Channel::Red);
            ColorError::OutOfRange {
                channel,
                value: self.channel(channel),
            }
        })
    }

    /// CSS hex notation (`#rrggbb`), rounding each channel to 8 bits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::WHITE
    }
}
