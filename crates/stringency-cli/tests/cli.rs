//! End-to-end tests for the `stringency` binary.
//!
//! Runs the compiled binary against the fixture event file and checks the
//! JSON it prints. No config file is present, so defaults apply.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("events.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stringency"))
        .args(["--config", "/nonexistent/stringency-config.yaml"])
        .args(args)
        .env("STRINGENCY_EVENTS_PATH", fixture_path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn run_json(args: &[&str]) -> Value {
    let output = run(args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn timeline_spans_first_to_last_event() {
    let json = run_json(&["timeline", "USA"]);
    let months: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap())
        .collect();
    assert_eq!(months.len(), 10);
    assert_eq!(months.first(), Some(&"2020-03"));
    assert_eq!(months.last(), Some(&"2020-12"));
}

#[test]
fn unknown_subject_uses_fallback_months() {
    let json = run_json(&["timeline", "ZZZ"]);
    assert_eq!(json, serde_json::json!(["2020-01", "2020-02"]));
}

#[test]
fn snapshot_counts_by_cutoff() {
    let march = run_json(&["snapshot", "USA", "2020-03"]);
    assert_eq!(march["categories"]["School Closures"]["count"], 1);
    assert_eq!(march["categories"]["Stay at Home"]["count"], 1);

    let may = run_json(&["snapshot", "USA", "2020-05"]);
    assert_eq!(may["categories"]["School Closures"]["count"], 2);
}

#[test]
fn snapshot_reports_unrecognized_categories() {
    let json = run_json(&["snapshot", "DEU", "2020-04"]);
    assert_eq!(json["categories"]["Gatherings"]["count"], 1);
    assert_eq!(json["unrecognized"].as_array().unwrap().len(), 1);
}

#[test]
fn malformed_month_is_rejected() {
    let output = run(&["snapshot", "USA", "2020-3"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn stats_ranks_regions_by_metric() {
    let json = run_json(&["stats", "--metric", "vaccinated"]);
    assert_eq!(json["metric"], "vaccinated");
    let values: Vec<u64> = json["regions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_u64().unwrap())
        .collect();
    assert_eq!(values.len(), 6);
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn play_completes_for_short_timeline() {
    let output = run(&["play", "DEU", "--interval-ms", "50"]);
    assert!(output.status.success());
}
