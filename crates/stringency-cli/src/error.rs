//! Error types for the `stringency` binary.
//!
//! [`CliError`] wraps every failure a subcommand can hit so `main` can
//! propagate with `?`.

use stringency_engine::config::ConfigError;
use stringency_engine::playback::PlaybackError;
use stringency_engine::source::SourceError;

/// Top-level error for the `stringency` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The event file could not be loaded.
    #[error("source error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: SourceError,
    },

    /// Playback could not run.
    #[error("playback error: {source}")]
    Playback {
        /// The underlying playback error.
        #[from]
        source: PlaybackError,
    },

    /// Output could not be serialized.
    #[error("output error: {source}")]
    Output {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
