//! Configuration loading and typed config structures for huecast.
//!
//! The configuration lives in `huecast-config.yaml` in the working
//! directory. Every field has a default, so a missing file or an empty
//! document yields a usable configuration.

use std::path::Path;

use huecast_types::ColorValue;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `huecast-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HuecastConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ListenConfig,

    /// Fan-out tuning.
    #[serde(default)]
    pub broadcast: BroadcastConfig,

    /// Color state settings.
    #[serde(default)]
    pub color: ColorConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HuecastConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override the listen address:
    /// - `HUECAST_HOST` overrides `server.host`
    /// - `HUECAST_PORT` overrides `server.port`
    /// - `PORT` overrides `server.port` when `HUECAST_PORT` is unset
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides and validating the result.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_with(yaml, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.server.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn parse_with(
        yaml: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast.viewer_queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                message: String::from("broadcast.viewer_queue_capacity must be at least 1"),
            });
        }
        self.color.initial.check().map_err(|e| ConfigError::Invalid {
            message: format!("color.initial: {e}"),
        })
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ListenConfig {
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("HUECAST_HOST") {
            self.host = host;
        }
        if let Some((key, raw)) = ["HUECAST_PORT", "PORT"]
            .into_iter()
            .find_map(|key| lookup(key).map(|raw| (key, raw)))
        {
            self.port = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                message: format!("{key}={raw:?} is not a valid port: {e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Fan-out tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BroadcastConfig {
    /// Frames a viewer may have pending before it is dropped as too slow.
    #[serde(default = "default_viewer_queue_capacity")]
    pub viewer_queue_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            viewer_queue_capacity: default_viewer_queue_capacity(),
        }
    }
}

/// Color state settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColorConfig {
    /// The color the process starts with.
    #[serde(default)]
    pub initial: ColorValue,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_viewer_queue_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_owned()
}
