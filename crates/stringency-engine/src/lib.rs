//! Time-windowed aggregation engine for the Stringency dashboard.
//!
//! This crate turns raw dated policy events into the two things every view
//! of the dashboard needs: a navigable month timeline per subject, and a
//! point-in-time snapshot of which policies were in force by the end of a
//! given month. Around that core it provides the data the overview charts
//! and the world map are drawn from.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `stringency-config.yaml` into
//!   strongly-typed structs.
//! - [`timeline`] -- Contiguous month ranges from a subject's events.
//! - [`snapshot`] -- Per-category snapshots and month-by-month series.
//! - [`source`] -- [`EventSource`] trait and the JSON-backed
//!   [`StaticSource`].
//! - [`sample`] -- Seeded sample events and country statistics.
//! - [`stats`] -- Regional and global roll-ups and compact number labels.
//! - [`scale`] -- Choropleth color scale for the map.
//! - [`playback`] -- Pausable month-by-month map playback.
//!
//! # Design Principles
//!
//! - The engine owns no data. Every call receives its events from the
//!   caller, so calls are independent and may run concurrently.
//! - Nothing is cached. Callers that re-render often can memoize on
//!   `(subject, cutoff)` themselves.
//! - Empty input is not an error: it yields the fallback timeline and an
//!   all-zero snapshot.

pub mod config;
pub mod playback;
pub mod sample;
pub mod scale;
pub mod snapshot;
pub mod source;
pub mod stats;
pub mod timeline;

use stringency_types::{MonthKey, PolicySnapshot, SeriesPoint};
use tracing::debug;

pub use crate::config::{ConfigError, DashboardConfig, TimelineConfig};
pub use crate::sample::SampleSource;
pub use crate::source::{EventSource, SourceError, StaticSource};

/// Entry point binding the configured fallback range to the aggregation
/// functions.
///
/// Holds configuration only. Events are supplied per call through an
/// [`EventSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationEngine {
    fallback_months: Vec<MonthKey>,
}

impl AggregationEngine {
    /// Build an engine from timeline configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the fallback range is empty or
    /// out of order.
    pub fn new(config: &TimelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            fallback_months: config.fallback_months.clone(),
        })
    }

    /// Months returned for subjects without events.
    pub fn fallback_months(&self) -> &[MonthKey] {
        &self.fallback_months
    }

    /// Navigable months for `subject`, earliest first. Never empty.
    pub fn timeline(&self, source: &dyn EventSource, subject: &str) -> Vec<MonthKey> {
        debug!(source = source.name(), subject, "timeline requested");
        timeline::compute_timeline_with_fallback(source.events(), subject, &self.fallback_months)
    }

    /// Policies `subject` had in force by the last day of `cutoff`.
    pub fn snapshot(
        &self,
        source: &dyn EventSource,
        subject: &str,
        cutoff: MonthKey,
    ) -> PolicySnapshot {
        debug!(source = source.name(), subject, cutoff = %cutoff, "snapshot requested");
        snapshot::compute_snapshot(source.events(), subject, cutoff)
    }

    /// Active-policy counts for every month of `subject`'s timeline.
    pub fn series(&self, source: &dyn EventSource, subject: &str) -> Vec<SeriesPoint> {
        let months = self.timeline(source, subject);
        snapshot::compute_series_for(source.events(), subject, &months)
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self {
            fallback_months: config::default_fallback_months(),
        }
    }
}
