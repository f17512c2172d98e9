//! Shared type definitions for the Stringency dashboard.
//!
//! This crate is the single source of truth for every type that crosses the
//! boundary between the aggregation engine and the dashboard front end.
//! Types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`date`] -- Strict `YYYY-MM-DD` event date parsing
//! - [`enums`] -- Closed enumerations (policy categories, regions, metrics)
//! - [`month`] -- The [`MonthKey`] calendar-month identifier
//! - [`structs`] -- Event records, snapshots, and statistics payloads
//! - [`error`] -- Parse errors for textual forms

pub mod date;
pub mod enums;
pub mod error;
pub mod month;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Metric, PolicyCategory, Region};
pub use date::parse_event_date;
pub use error::{EventDateError, MonthKeyError, ParseEnumError};
pub use month::MonthKey;
pub use structs::{
    CategorySnapshot, CountryStats, CovidDataset, GlobalStats, PolicyEvent, PolicySnapshot,
    RegionalStats, ScaleLegend, SeriesPoint, per_million,
};
