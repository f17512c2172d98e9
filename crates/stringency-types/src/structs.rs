//! Core record and summary structs for the Stringency dashboard.
//!
//! Covers the raw [`PolicyEvent`] input record, the per-category
//! [`PolicySnapshot`] the aggregation engine produces, and the country,
//! regional, and global statistics shown by the map and bar charts.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Metric, PolicyCategory, Region};
use crate::month::MonthKey;

/// Divisor basis for per-million rates.
const PER_MILLION: u128 = 1_000_000;

// ---------------------------------------------------------------------------
// Policy events
// ---------------------------------------------------------------------------

/// A single dated policy measure implemented by a country.
///
/// Events are immutable facts. The `category` is kept as the raw label so
/// that records with labels outside [`PolicyCategory`] can still be loaded
/// and reported as unrecognized instead of failing the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PolicyEvent {
    /// Subject identifier, usually an ISO 3166 alpha-3 country code.
    pub subject: String,
    /// Region or sub-national identifier within the subject.
    pub region: String,
    /// Category label, expected to match a [`PolicyCategory`] label.
    pub category: String,
    /// Implementation date (zero-padded `YYYY-MM-DD` on the wire).
    #[serde(deserialize_with = "crate::date::deserialize")]
    pub date: NaiveDate,
}

impl PolicyEvent {
    /// Create a new event record.
    pub fn new(
        subject: impl Into<String>,
        region: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            subject: subject.into(),
            region: region.into(),
            category: category.into(),
            date,
        }
    }

    /// The known category this event belongs to, if its label is recognized.
    pub fn known_category(&self) -> Option<PolicyCategory> {
        PolicyCategory::from_label(&self.category)
    }

    /// The calendar month of the implementation date.
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Events of one category active as of a cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CategorySnapshot {
    /// The category described.
    pub category: PolicyCategory,
    /// Number of contributing events. Always equals `events.len()`.
    pub count: usize,
    /// Contributing events, in input order.
    pub events: Vec<PolicyEvent>,
}

impl CategorySnapshot {
    /// A zero-count entry for a category with no active events.
    pub const fn empty(category: PolicyCategory) -> Self {
        Self {
            category,
            count: 0,
            events: Vec::new(),
        }
    }
}

/// Point-in-time summary of a subject's active policies.
///
/// `categories` always holds exactly one entry per [`PolicyCategory`],
/// iterated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PolicySnapshot {
    /// Subject the snapshot was computed for.
    pub subject: String,
    /// Cutoff month requested by the caller.
    #[ts(as = "String")]
    pub cutoff: MonthKey,
    /// Inclusive cutoff date: the last calendar day of `cutoff`.
    pub cutoff_date: NaiveDate,
    /// Per-category counts and contributing events.
    pub categories: BTreeMap<PolicyCategory, CategorySnapshot>,
    /// Events within the cutoff whose category label is not recognized.
    /// They are excluded from every category and from [`Self::total`].
    pub unrecognized: Vec<PolicyEvent>,
}

impl PolicySnapshot {
    /// Sum of all category counts.
    pub fn total(&self) -> usize {
        self.categories
            .values()
            .fold(0_usize, |acc, c| acc.saturating_add(c.count))
    }

    /// Count for a single category (0 if somehow absent).
    pub fn count(&self, category: PolicyCategory) -> usize {
        self.categories.get(&category).map_or(0, |c| c.count)
    }

    /// Snapshot entry for a single category.
    pub fn get(&self, category: PolicyCategory) -> Option<&CategorySnapshot> {
        self.categories.get(&category)
    }
}

/// Active policy counts at the end of one timeline month.
///
/// A sequence of these backs the stringency-evolution line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeriesPoint {
    /// The month described.
    #[ts(as = "String")]
    pub month: MonthKey,
    /// Sum of all category counts.
    pub total: usize,
    /// Active events per category, one entry per [`PolicyCategory`].
    pub counts: BTreeMap<PolicyCategory, usize>,
}

// ---------------------------------------------------------------------------
// Country, regional, and global statistics
// ---------------------------------------------------------------------------

/// Cumulative and daily figures for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    /// ISO 3166 alpha-3 code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Continental region.
    pub region: Region,
    /// Total population.
    pub population: u64,
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
    /// Cumulative recoveries.
    pub recovered: u64,
    /// Cumulative vaccinated individuals.
    pub vaccinated: u64,
    /// Cases reported in the latest day.
    pub new_cases: u64,
    /// Deaths reported in the latest day.
    pub new_deaths: u64,
    /// Recoveries reported in the latest day.
    pub new_recovered: u64,
    /// Vaccinations reported in the latest day.
    pub new_vaccinated: u64,
}

impl CountryStats {
    /// Cumulative value of `metric`.
    pub const fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
            Metric::Vaccinated => self.vaccinated,
        }
    }

    /// `metric` per million inhabitants, rounded down.
    ///
    /// Computed as `floor(value * 1_000_000 / population)` in integer
    /// arithmetic. A population of zero yields zero.
    pub fn per_million(&self, metric: Metric) -> u64 {
        per_million(self.metric(metric), self.population)
    }
}

/// Rate of `value` per million of `population`, rounded down.
pub fn per_million(value: u64, population: u64) -> u64 {
    u128::from(value)
        .checked_mul(PER_MILLION)
        .and_then(|scaled| scaled.checked_div(u128::from(population)))
        .map_or(0, |rate| u64::try_from(rate).unwrap_or(u64::MAX))
}

/// Cumulative figures summed over all countries of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionalStats {
    /// The region described.
    pub region: Region,
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
    /// Cumulative recoveries.
    pub recovered: u64,
    /// Cumulative vaccinated individuals.
    pub vaccinated: u64,
    /// Combined population.
    pub population: u64,
}

impl RegionalStats {
    /// A zeroed roll-up for `region`.
    pub const fn empty(region: Region) -> Self {
        Self {
            region,
            cases: 0,
            deaths: 0,
            recovered: 0,
            vaccinated: 0,
            population: 0,
        }
    }

    /// Cumulative value of `metric`.
    pub const fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
            Metric::Vaccinated => self.vaccinated,
        }
    }
}

/// Worldwide cumulative and daily totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    /// Cumulative confirmed cases.
    pub cases: u64,
    /// Cumulative deaths.
    pub deaths: u64,
    /// Cumulative recoveries.
    pub recovered: u64,
    /// Cumulative vaccinated individuals.
    pub vaccinated: u64,
    /// World population covered by the dataset.
    pub population: u64,
    /// Cases reported in the latest day.
    pub new_cases: u64,
    /// Deaths reported in the latest day.
    pub new_deaths: u64,
    /// Recoveries reported in the latest day.
    pub new_recovered: u64,
    /// Vaccinations reported in the latest day.
    pub new_vaccinated: u64,
}

/// The full statistics payload backing the overview dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CovidDataset {
    /// Worldwide totals.
    pub global: GlobalStats,
    /// One roll-up per region, in [`Region`] declaration order.
    pub regions: Vec<RegionalStats>,
    /// Per-country figures.
    pub countries: Vec<CountryStats>,
    /// When the dataset was assembled.
    pub last_updated: DateTime<Utc>,
}

/// Endpoints of a choropleth legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ScaleLegend {
    /// Metric the scale colors by.
    pub metric: Metric,
    /// Lower end of the domain (always 0).
    pub min: u64,
    /// Upper end of the domain: the largest per-million value.
    pub max: u64,
    /// Color at `min`, as `#rrggbb`.
    pub min_color: String,
    /// Color at `max`, as `#rrggbb`.
    pub max_color: String,
}
