//! Enumeration types for the Stringency dashboard.
//!
//! Every enumeration here is closed: the engine reports on each variant
//! regardless of whether any data exists for it. Declaration order is the
//! display order, so the derived [`Ord`] doubles as the rendering order
//! when the variants are used as [`BTreeMap`](std::collections::BTreeMap)
//! keys.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ParseEnumError;

// ---------------------------------------------------------------------------
// Policy categories
// ---------------------------------------------------------------------------

/// A containment policy measure tracked per country.
///
/// The serialized form is the human-readable label (e.g. `"School
/// Closures"`), which is also the label carried by raw event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PolicyCategory {
    /// Closure of schools and universities.
    #[serde(rename = "School Closures")]
    SchoolClosures,
    /// Closure of workplaces.
    #[serde(rename = "Workplace Closures")]
    WorkplaceClosures,
    /// Cancellation of public events.
    #[serde(rename = "Public Events")]
    PublicEvents,
    /// Restrictions on the size of gatherings.
    #[serde(rename = "Gatherings")]
    Gatherings,
    /// Closure of public transport.
    #[serde(rename = "Public Transport")]
    PublicTransport,
    /// Stay-at-home requirements.
    #[serde(rename = "Stay at Home")]
    StayAtHome,
    /// International travel controls.
    #[serde(rename = "Travel Controls")]
    TravelControls,
}

impl PolicyCategory {
    /// Every known category in declaration order.
    pub const ALL: [Self; 7] = [
        Self::SchoolClosures,
        Self::WorkplaceClosures,
        Self::PublicEvents,
        Self::Gatherings,
        Self::PublicTransport,
        Self::StayAtHome,
        Self::TravelControls,
    ];

    /// The label used on the wire and in the dashboard.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SchoolClosures => "School Closures",
            Self::WorkplaceClosures => "Workplace Closures",
            Self::PublicEvents => "Public Events",
            Self::Gatherings => "Gatherings",
            Self::PublicTransport => "Public Transport",
            Self::StayAtHome => "Stay at Home",
            Self::TravelControls => "Travel Controls",
        }
    }

    /// Look up a category by its exact label.
    ///
    /// Returns `None` for labels outside the known enumeration. Matching is
    /// case-sensitive: raw records are expected to carry the canonical label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParseEnumError {
            kind: "policy category",
            input: s.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// A continental region used for regional roll-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Region {
    /// North and Central America.
    #[serde(rename = "North America")]
    NorthAmerica,
    /// South America.
    #[serde(rename = "South America")]
    SouthAmerica,
    /// Europe, including Russia.
    Europe,
    /// Asia, including the Middle East.
    Asia,
    /// Africa.
    Africa,
    /// Australia, New Zealand, and the Pacific.
    Oceania,
}

impl Region {
    /// Every region in declaration order.
    pub const ALL: [Self; 6] = [
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Europe,
        Self::Asia,
        Self::Africa,
        Self::Oceania,
    ];

    /// Human-readable region name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "region",
                input: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A cumulative epidemiological metric shown on the map and bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Confirmed cases.
    Cases,
    /// Deaths.
    Deaths,
    /// Recoveries.
    Recovered,
    /// Vaccinated individuals.
    Vaccinated,
}

impl Metric {
    /// Every metric in declaration order.
    pub const ALL: [Self; 4] = [Self::Cases, Self::Deaths, Self::Recovered, Self::Vaccinated];

    /// Lowercase metric name as used in query parameters.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
            Self::Vaccinated => "vaccinated",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "metric",
                input: s.to_owned(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in PolicyCategory::ALL {
            assert_eq!(PolicyCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn category_lookup_is_exact() {
        assert_eq!(PolicyCategory::from_label("school closures"), None);
        assert_eq!(PolicyCategory::from_label("Curfews"), None);
        assert!("Curfews".parse::<PolicyCategory>().is_err());
    }

    #[test]
    fn category_order_matches_declaration() {
        let mut sorted = PolicyCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, PolicyCategory::ALL);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&PolicyCategory::StayAtHome).unwrap();
        assert_eq!(json, "\"Stay at Home\"");
        let back: PolicyCategory = serde_json::from_str("\"Travel Controls\"").unwrap();
        assert_eq!(back, PolicyCategory::TravelControls);
    }

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!("north america".parse::<Region>().unwrap(), Region::NorthAmerica);
        assert!("Antarctica".parse::<Region>().is_err());
    }

    #[test]
    fn metric_parses_and_serializes_lowercase() {
        assert_eq!("Deaths".parse::<Metric>().unwrap(), Metric::Deaths);
        let json = serde_json::to_string(&Metric::Vaccinated).unwrap();
        assert_eq!(json, "\"vaccinated\"");
    }
}
