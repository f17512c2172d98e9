//! Configuration loading and typed config structures for the dashboard engine.
//!
//! The canonical configuration lives in `stringency-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every section is optional; missing sections take their defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use stringency_types::MonthKey;

/// Environment variable overriding `dataset.events_path`.
pub const EVENTS_PATH_ENV: &str = "STRINGENCY_EVENTS_PATH";

/// Smallest accepted playback frame interval in milliseconds.
pub const MIN_FRAME_INTERVAL_MS: u64 = 50;

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

    /// The configuration parsed but violates a constraint.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
///
/// Mirrors the structure of `stringency-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Timeline derivation settings.
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Where event records come from.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Map playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `STRINGENCY_EVENTS_PATH` environment variable overrides
    /// `dataset.events_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.dataset.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timeline.validate()?;
        self.playback.validate()
    }
}

/// Timeline derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineConfig {
    /// Months returned when a subject has no events. Must be non-empty
    /// and strictly ascending.
    #[serde(default = "default_fallback_months")]
    pub fallback_months: Vec<MonthKey>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fallback_months: default_fallback_months(),
        }
    }
}

impl TimelineConfig {
    /// Check that the fallback range can stand in for a real timeline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the list is empty or not
    /// strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_months.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "timeline.fallback_months must contain at least one month".to_owned(),
            });
        }
        if self.fallback_months.windows(2).any(|w| w.first() >= w.get(1)) {
            return Err(ConfigError::Invalid {
                reason: "timeline.fallback_months must be strictly ascending".to_owned(),
            });
        }
        Ok(())
    }
}

/// Event dataset settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// JSON file holding an array of event records. When absent the
    /// seeded sample dataset is used.
    #[serde(default)]
    pub events_path: Option<PathBuf>,

    /// Seed for the sample dataset generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            seed: default_seed(),
        }
    }
}

impl DatasetConfig {
    /// Apply environment variable overrides.
    ///
    /// If `STRINGENCY_EVENTS_PATH` is set and non-empty, it replaces
    /// `events_path`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(EVENTS_PATH_ENV) {
            if !path.is_empty() {
                self.events_path = Some(PathBuf::from(path));
            }
        }
    }
}

/// Map playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackConfig {
    /// Real-time milliseconds between frames.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Restart from the first month after the last one.
    #[serde(default)]
    pub loop_playback: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            loop_playback: false,
        }
    }
}

impl PlaybackConfig {
    /// Check the frame interval floor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the interval is below
    /// [`MIN_FRAME_INTERVAL_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms < MIN_FRAME_INTERVAL_MS {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "playback.frame_interval_ms must be at least {MIN_FRAME_INTERVAL_MS}, got {}",
                    self.frame_interval_ms
                ),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
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

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// The two placeholder months used when a subject has no events:
/// `2020-01` and `2020-02`.
pub fn default_fallback_months() -> Vec<MonthKey> {
    [(2020, 1), (2020, 2)]
        .into_iter()
        .filter_map(|(year, month)| MonthKey::new(year, month).ok())
        .collect()
}

const fn default_seed() -> u64 {
    42
}

const fn default_frame_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_owned()
}
