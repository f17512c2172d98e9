//! Regional and global statistics roll-ups.
//!
//! Country figures are summed into one [`RegionalStats`] per region and a
//! single [`GlobalStats`]. All sums saturate rather than wrap; a saturated
//! figure is still the most useful thing to show on a chart.

use chrono::{DateTime, Utc};
use stringency_types::{CountryStats, CovidDataset, GlobalStats, Metric, RegionalStats, Region};

/// Roll country figures up into one entry per region.
///
/// The result always has one entry per [`Region`], in declaration order.
/// Regions without countries report zeros.
pub fn aggregate_regions(countries: &[CountryStats]) -> Vec<RegionalStats> {
    Region::ALL
        .into_iter()
        .map(|region| {
            countries
                .iter()
                .filter(|c| c.region == region)
                .fold(RegionalStats::empty(region), |mut acc, c| {
                    acc.cases = acc.cases.saturating_add(c.cases);
                    acc.deaths = acc.deaths.saturating_add(c.deaths);
                    acc.recovered = acc.recovered.saturating_add(c.recovered);
                    acc.vaccinated = acc.vaccinated.saturating_add(c.vaccinated);
                    acc.population = acc.population.saturating_add(c.population);
                    acc
                })
        })
        .collect()
}

/// Sum every country into worldwide totals, including daily deltas.
pub fn aggregate_global(countries: &[CountryStats]) -> GlobalStats {
    countries
        .iter()
        .fold(GlobalStats::default(), |mut acc, c| {
            acc.cases = acc.cases.saturating_add(c.cases);
            acc.deaths = acc.deaths.saturating_add(c.deaths);
            acc.recovered = acc.recovered.saturating_add(c.recovered);
            acc.vaccinated = acc.vaccinated.saturating_add(c.vaccinated);
            acc.population = acc.population.saturating_add(c.population);
            acc.new_cases = acc.new_cases.saturating_add(c.new_cases);
            acc.new_deaths = acc.new_deaths.saturating_add(c.new_deaths);
            acc.new_recovered = acc.new_recovered.saturating_add(c.new_recovered);
            acc.new_vaccinated = acc.new_vaccinated.saturating_add(c.new_vaccinated);
            acc
        })
}

/// Regions ordered by `metric`, largest first.
///
/// Ties keep their input order.
pub fn rank_regions(regions: &[RegionalStats], metric: Metric) -> Vec<RegionalStats> {
    let mut ranked = regions.to_vec();
    ranked.sort_by(|a, b| b.metric(metric).cmp(&a.metric(metric)));
    ranked
}

/// Assemble the overview payload from per-country figures.
pub fn build_dataset(countries: Vec<CountryStats>, as_of: DateTime<Utc>) -> CovidDataset {
    CovidDataset {
        global: aggregate_global(&countries),
        regions: aggregate_regions(&countries),
        countries,
        last_updated: as_of,
    }
}

/// Render a count compactly for chart axes: `1.2M`, `3.4K`, or the plain
/// integer below one thousand.
///
/// Rounds half up to one decimal place.
pub fn format_compact(value: u64) -> String {
    let (unit, suffix) = match value {
        1_000_000.. => (1_000_000_u64, "M"),
        1_000.. => (1_000, "K"),
        _ => return value.to_string(),
    };
    let tenth = unit.div_euclid(10);
    let tenths = value
        .saturating_add(tenth.div_euclid(2))
        .div_euclid(tenth);
    format!("{}.{}{suffix}", tenths.div_euclid(10), tenths.rem_euclid(10))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn country(code: &str, region: Region, cases: u64, population: u64) -> CountryStats {
        CountryStats {
            code: code.to_owned(),
            name: code.to_owned(),
            region,
            population,
            cases,
            deaths: cases.div_euclid(100),
            recovered: cases.div_euclid(2),
            vaccinated: population.div_euclid(2),
            new_cases: 10,
            new_deaths: 1,
            new_recovered: 5,
            new_vaccinated: 100,
        }
    }

    fn fixture() -> Vec<CountryStats> {
        vec![
            country("USA", Region::NorthAmerica, 1_000, 300_000),
            country("CAN", Region::NorthAmerica, 500, 40_000),
            country("FRA", Region::Europe, 2_000, 60_000),
            country("AUS", Region::Oceania, 100, 25_000),
        ]
    }

    #[test]
    fn regions_cover_every_region_in_order() {
        let regions = aggregate_regions(&fixture());
        let order: Vec<_> = regions.iter().map(|r| r.region).collect();
        assert_eq!(order, Region::ALL);
        let africa = regions.iter().find(|r| r.region == Region::Africa).unwrap();
        assert_eq!(africa, &RegionalStats::empty(Region::Africa));
    }

    #[test]
    fn regions_sum_their_countries() {
        let regions = aggregate_regions(&fixture());
        let na = regions.iter().find(|r| r.region == Region::NorthAmerica).unwrap();
        assert_eq!(na.cases, 1_500);
        assert_eq!(na.population, 340_000);
        assert_eq!(na.deaths, 15);
    }

    #[test]
    fn global_sums_everything() {
        let global = aggregate_global(&fixture());
        assert_eq!(global.cases, 3_600);
        assert_eq!(global.population, 425_000);
        assert_eq!(global.new_cases, 40);
        assert_eq!(global.new_vaccinated, 400);
    }

    #[test]
    fn global_of_nothing_is_zero() {
        assert_eq!(aggregate_global(&[]), GlobalStats::default());
    }

    #[test]
    fn sums_saturate() {
        let big = vec![
            country("AAA", Region::Asia, u64::MAX, 1),
            country("BBB", Region::Asia, 1, 1),
        ];
        assert_eq!(aggregate_global(&big).cases, u64::MAX);
    }

    #[test]
    fn ranking_is_descending() {
        let ranked = rank_regions(&aggregate_regions(&fixture()), Metric::Cases);
        let top: Vec<_> = ranked.iter().take(3).map(|r| r.region).collect();
        assert_eq!(top, [Region::Europe, Region::NorthAmerica, Region::Oceania]);
    }

    #[test]
    fn compact_formatting() {
        assert_eq!(format_compact(0), "0");
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_000), "1.0K");
        assert_eq!(format_compact(1_250), "1.3K");
        assert_eq!(format_compact(45_678), "45.7K");
        assert_eq!(format_compact(1_000_000), "1.0M");
        assert_eq!(format_compact(12_340_000), "12.3M");
    }
}
