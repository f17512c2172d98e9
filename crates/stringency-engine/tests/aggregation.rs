//! Integration tests for timeline and snapshot aggregation.
//!
//! Exercises the engine through its public API against JSON fixtures and
//! the seeded sample source, checking the properties every dashboard view
//! relies on: contiguous timelines, a fixed category set, and totals that
//! match a direct count of the underlying events.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use stringency_engine::sample::SAMPLE_COUNTRIES;
use stringency_engine::timeline::compute_timeline;
use stringency_engine::{AggregationEngine, EventSource, SampleSource, StaticSource};
use stringency_types::{MonthKey, PolicyCategory};

const FIXTURE: &str = r#"[
    {"subject": "USA", "region": "NY", "category": "School Closures", "date": "2020-03-15"},
    {"subject": "USA", "region": "NY", "category": "School Closures", "date": "2020-05-15"},
    {"subject": "USA", "region": "CA", "category": "Stay at Home", "date": "2020-07-04"},
    {"subject": "USA", "region": "TX", "category": "Travel Controls", "date": "2020-12-21"},
    {"subject": "CAN", "region": "ON", "category": "Gatherings", "date": "2020-02-29"},
    {"subject": "CAN", "region": "QC", "category": "Curfews", "date": "2020-02-10"}
]"#;

fn fixture() -> StaticSource {
    StaticSource::from_json_str(FIXTURE).unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn labels(months: &[MonthKey]) -> Vec<String> {
    months.iter().map(ToString::to_string).collect()
}

#[test]
fn school_closures_accumulate_by_cutoff() {
    let engine = AggregationEngine::default();
    let source = fixture();
    let march = engine.snapshot(&source, "USA", month("2020-03"));
    let may = engine.snapshot(&source, "USA", month("2020-05"));
    assert_eq!(march.count(PolicyCategory::SchoolClosures), 1);
    assert_eq!(may.count(PolicyCategory::SchoolClosures), 2);
}

#[test]
fn timeline_spans_march_to_december() {
    let timeline = AggregationEngine::default().timeline(&fixture(), "USA");
    assert_eq!(timeline.len(), 10);
    assert_eq!(timeline.first().map(ToString::to_string).as_deref(), Some("2020-03"));
    assert_eq!(timeline.last().map(ToString::to_string).as_deref(), Some("2020-12"));
}

#[test]
fn unknown_subject_gets_fallback_and_zero_snapshot() {
    let engine = AggregationEngine::default();
    let source = fixture();
    assert_eq!(labels(&engine.timeline(&source, "ZZZ")), ["2020-01", "2020-02"]);

    let snap = engine.snapshot(&source, "ZZZ", month("2020-01"));
    assert_eq!(snap.total(), 0);
    assert_eq!(snap.categories.len(), PolicyCategory::ALL.len());
}

#[test]
fn leap_day_falls_inside_february() {
    let snap = AggregationEngine::default().snapshot(&fixture(), "CAN", month("2020-02"));
    assert_eq!(snap.count(PolicyCategory::Gatherings), 1);
    assert_eq!(snap.unrecognized.len(), 1);
}

#[test]
fn snapshot_serializes_categories_by_label() {
    let snap = AggregationEngine::default().snapshot(&fixture(), "USA", month("2020-07"));
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["cutoff"], "2020-07");
    assert_eq!(json["cutoff_date"], "2020-07-31");
    assert_eq!(json["categories"]["Stay at Home"]["count"], 1);
    assert_eq!(json["categories"]["Public Transport"]["count"], 0);
}

#[test]
fn totals_match_direct_count_for_sample_data() {
    let engine = AggregationEngine::default();
    let source = SampleSource::generate(2024);

    for (code, _, _) in SAMPLE_COUNTRIES {
        for cutoff in engine.timeline(&source, code) {
            let snap = engine.snapshot(&source, code, cutoff);
            let expected = source
                .events()
                .iter()
                .filter(|e| e.subject == code && e.date <= cutoff.last_day())
                .count();
            assert_eq!(snap.total(), expected, "{code} at {cutoff}");
        }
    }
}

#[test]
fn sample_timelines_are_contiguous_and_cover_the_span() {
    let source = SampleSource::generate(7);
    for (code, _, _) in SAMPLE_COUNTRIES {
        let timeline = compute_timeline(source.events(), code);
        assert!(!timeline.is_empty());
        assert!(timeline.windows(2).all(|w| w.first().and_then(|m| m.succ()) == w.get(1).copied()));

        let dates: Vec<NaiveDate> = source
            .events()
            .iter()
            .filter(|e| e.subject == code)
            .map(|e| e.date)
            .collect();
        if let (Some(min), Some(max)) = (dates.iter().min(), dates.iter().max()) {
            assert_eq!(timeline.first().copied(), Some(MonthKey::from_date(*min)));
            assert_eq!(timeline.last().copied(), Some(MonthKey::from_date(*max)));
        }
    }
}

#[test]
fn repeated_queries_are_value_equal() {
    let engine = AggregationEngine::default();
    let source = fixture();
    assert_eq!(engine.timeline(&source, "USA"), engine.timeline(&source, "USA"));
    assert_eq!(
        engine.snapshot(&source, "USA", month("2020-09")),
        engine.snapshot(&source, "USA", month("2020-09"))
    );
}

#[test]
fn sources_can_be_shared_across_threads() {
    let engine = AggregationEngine::default();
    let source = SampleSource::generate(1);
    let expected = engine.series(&source, "USA");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.series(&source, "USA")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
