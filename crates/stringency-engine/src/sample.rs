//! Seeded sample datasets.
//!
//! The dashboard ships without a live feed. These generators produce a
//! deterministic mock dataset from a seed: a set of policy events per
//! country for the stringency views, and cumulative country statistics for
//! the overview. The same seed always yields the same data, so screenshots
//! and tests are reproducible.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stringency_types::{CountryStats, CovidDataset, PolicyCategory, PolicyEvent, Region};
use tracing::info;

use crate::source::EventSource;
use crate::stats;

/// Countries covered by the sample dataset: (code, name, region).
pub const SAMPLE_COUNTRIES: [(&str, &str, Region); 27] = [
    ("USA", "United States", Region::NorthAmerica),
    ("BRA", "Brazil", Region::SouthAmerica),
    ("IND", "India", Region::Asia),
    ("RUS", "Russia", Region::Europe),
    ("FRA", "France", Region::Europe),
    ("GBR", "United Kingdom", Region::Europe),
    ("ITA", "Italy", Region::Europe),
    ("DEU", "Germany", Region::Europe),
    ("ESP", "Spain", Region::Europe),
    ("CHN", "China", Region::Asia),
    ("MEX", "Mexico", Region::NorthAmerica),
    ("ZAF", "South Africa", Region::Africa),
    ("PER", "Peru", Region::SouthAmerica),
    ("IRN", "Iran", Region::Asia),
    ("COL", "Colombia", Region::SouthAmerica),
    ("ARG", "Argentina", Region::SouthAmerica),
    ("POL", "Poland", Region::Europe),
    ("UKR", "Ukraine", Region::Europe),
    ("IDN", "Indonesia", Region::Asia),
    ("TUR", "Turkey", Region::Asia),
    ("NLD", "Netherlands", Region::Europe),
    ("CZE", "Czech Republic", Region::Europe),
    ("CAN", "Canada", Region::NorthAmerica),
    ("CHL", "Chile", Region::SouthAmerica),
    ("JPN", "Japan", Region::Asia),
    ("AUS", "Australia", Region::Oceania),
    ("NZL", "New Zealand", Region::Oceania),
];

/// Maximum number of events generated per (country, category) pair.
const MAX_EVENTS_PER_CATEGORY: u32 = 3;

/// Length of the window sample events are spread over, in days.
const EVENT_WINDOW_DAYS: u64 = 730;

/// First day sample events can fall on.
fn event_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Scale `value` by `basis_points / 10_000`, rounding down.
fn scale_bp(value: u64, basis_points: u64) -> u64 {
    value
        .checked_mul(basis_points)
        .and_then(|v| v.checked_div(10_000))
        .unwrap_or(0)
}

/// Generate policy events for every sample country.
///
/// Each country gets between zero and three events per category, dated
/// uniformly across 2020 and 2021. The result is sorted by date, then
/// subject.
pub fn generate_events(seed: u64) -> Vec<PolicyEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = event_window_start();
    let mut events = Vec::new();

    for (code, _, region) in SAMPLE_COUNTRIES {
        for category in PolicyCategory::ALL {
            let count = rng.random_range(0..=MAX_EVENTS_PER_CATEGORY);
            for _ in 0..count {
                let offset = rng.random_range(0..EVENT_WINDOW_DAYS);
                let Some(date) = start.checked_add_days(Days::new(offset)) else {
                    continue;
                };
                events.push(PolicyEvent::new(code, region.label(), category.label(), date));
            }
        }
    }

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.subject.cmp(&b.subject)));
    events
}

/// Generate cumulative statistics for every sample country.
pub fn generate_countries(seed: u64) -> Vec<CountryStats> {
    let mut rng = StdRng::seed_from_u64(seed);

    SAMPLE_COUNTRIES
        .iter()
        .map(|&(code, name, region)| {
            let population: u64 = rng.random_range(1_000_000..501_000_000);
            let cases: u64 = rng.random_range(0..10_000_000);
            let deaths = scale_bp(cases, rng.random_range(0..500));
            let recovered = scale_bp(cases, rng.random_range(0..8_000));
            let vaccinated = scale_bp(population, rng.random_range(0..7_000));

            CountryStats {
                code: code.to_owned(),
                name: name.to_owned(),
                region,
                population,
                cases,
                deaths,
                recovered,
                vaccinated,
                new_cases: rng.random_range(0..50_000),
                new_deaths: rng.random_range(0..1_000),
                new_recovered: rng.random_range(0..40_000),
                new_vaccinated: rng.random_range(0..100_000),
            }
        })
        .collect()
}

/// Generate the full overview dataset: countries plus regional and global
/// roll-ups, stamped with `as_of`.
pub fn generate_dataset(seed: u64, as_of: DateTime<Utc>) -> CovidDataset {
    let countries = generate_countries(seed);
    let dataset = stats::build_dataset(countries, as_of);
    info!(
        seed,
        countries = dataset.countries.len(),
        "Sample statistics generated"
    );
    dataset
}

/// An [`EventSource`] backed by [`generate_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSource {
    seed: u64,
    events: Vec<PolicyEvent>,
}

impl SampleSource {
    /// Generate the sample event set for `seed`.
    pub fn generate(seed: u64) -> Self {
        let events = generate_events(seed);
        info!(seed, events = events.len(), "Sample events generated");
        Self { seed, events }
    }

    /// The seed the events were generated from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl EventSource for SampleSource {
    fn events(&self) -> &[PolicyEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "sample"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_events() {
        assert_eq!(generate_events(7), generate_events(7));
    }

    #[test]
    fn events_use_known_categories_and_window() {
        let start = event_window_start();
        let end = start.checked_add_days(Days::new(EVENT_WINDOW_DAYS)).unwrap();
        for event in generate_events(42) {
            assert!(event.known_category().is_some());
            assert!(event.date >= start && event.date < end);
            assert!(SAMPLE_COUNTRIES.iter().any(|(code, _, _)| *code == event.subject));
        }
    }

    #[test]
    fn events_are_sorted_by_date() {
        let events = generate_events(3);
        assert!(events.windows(2).all(|w| w.first().map(|e| e.date) <= w.get(1).map(|e| e.date)));
    }

    #[test]
    fn country_figures_are_consistent() {
        for country in generate_countries(11) {
            assert!(country.population >= 1_000_000);
            assert!(country.deaths <= country.cases);
            assert!(country.recovered <= country.cases);
            assert!(country.vaccinated <= country.population);
        }
    }

    #[test]
    fn dataset_rolls_up_all_countries() {
        let dataset = generate_dataset(5, Utc::now());
        assert_eq!(dataset.countries.len(), SAMPLE_COUNTRIES.len());
        assert_eq!(dataset.regions.len(), Region::ALL.len());
        let summed: u64 = dataset.countries.iter().map(|c| c.cases).sum();
        assert_eq!(dataset.global.cases, summed);
    }

    #[test]
    fn sample_source_reports_seed() {
        let source = SampleSource::generate(99);
        assert_eq!(source.seed(), 99);
        assert_eq!(source.events(), generate_events(99).as_slice());
    }
}
