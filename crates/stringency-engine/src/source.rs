//! Event source trait and in-memory implementation.
//!
//! The aggregation engine never owns its data. Callers hand it an
//! [`EventSource`] at call time, which keeps the engine stateless and lets
//! tests supply fixtures without touching any global dataset. A source
//! could be backed by a JSON file, a generated sample, or an upstream feed.
//!
//! Sources validate records at their boundary: once loaded, every event has
//! a typed calendar date, so the engine never re-parses date strings.

use std::path::Path;

use stringency_types::PolicyEvent;
use tracing::info;

/// Errors that can occur while loading an event source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The event file could not be read.
    #[error("failed to read event file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The event payload is not a valid JSON array of event records.
    #[error("failed to parse events JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// A provider of policy event records.
///
/// Implementations must be cheap to query repeatedly: the engine calls
/// [`events`](EventSource::events) on every timeline and snapshot request.
pub trait EventSource: Send + Sync {
    /// All events known to the source, in no particular order.
    fn events(&self) -> &[PolicyEvent];

    /// Short human-readable name for logs.
    fn name(&self) -> &str {
        "events"
    }
}

impl EventSource for Vec<PolicyEvent> {
    fn events(&self) -> &[PolicyEvent] {
        self
    }
}

/// An event source holding a fixed set of records in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    name: String,
    events: Vec<PolicyEvent>,
}

impl StaticSource {
    /// Wrap an existing set of events.
    pub fn new(events: Vec<PolicyEvent>) -> Self {
        Self {
            name: "static".to_owned(),
            events,
        }
    }

    /// Replace the name reported in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parse a JSON array of event records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the payload is not an array of
    /// well-formed records (including malformed `YYYY-MM-DD` dates).
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let events: Vec<PolicyEvent> = serde_json::from_str(json)?;
        Ok(Self::new(events).with_name("json"))
    }

    /// Load a JSON array of event records from a file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Json`] if its contents are not valid records.
    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&contents)?.with_name(path.display().to_string());
        info!(
            path = %path.display(),
            events = source.events.len(),
            "Event file loaded"
        );
        Ok(source)
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the source holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the source and return its events.
    pub fn into_events(self) -> Vec<PolicyEvent> {
        self.events
    }
}

impl EventSource for StaticSource {
    fn events(&self) -> &[PolicyEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<Vec<PolicyEvent>> for StaticSource {
    fn from(events: Vec<PolicyEvent>) -> Self {
        Self::new(events)
    }
}
