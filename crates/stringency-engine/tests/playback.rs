//! Integration tests for map playback.
//!
//! Drives [`run_playback`] over real timelines with tokio's paused clock so
//! frame timing is deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use stringency_engine::config::PlaybackConfig;
use stringency_engine::playback::{
    Frame, FrameCallback, PlaybackControl, PlaybackEndReason, run_playback,
};
use stringency_engine::{AggregationEngine, StaticSource};
use stringency_types::MonthKey;
use tokio::time::{Duration, Instant};

const EVENTS: &str = r#"[
    {"subject": "FRA", "region": "IDF", "category": "Gatherings", "date": "2020-10-05"},
    {"subject": "FRA", "region": "IDF", "category": "Stay at Home", "date": "2021-01-17"}
]"#;

struct Totals {
    engine: AggregationEngine,
    source: StaticSource,
    totals: Vec<(MonthKey, usize)>,
}

impl FrameCallback for Totals {
    fn on_frame(&mut self, frame: &Frame) {
        let snap = self.engine.snapshot(&self.source, "FRA", frame.month);
        self.totals.push((frame.month, snap.total()));
    }
}

struct Count(u64);

impl FrameCallback for Count {
    fn on_frame(&mut self, _frame: &Frame) {
        self.0 = self.0.saturating_add(1);
    }
}

#[tokio::test(start_paused = true)]
async fn playback_drives_snapshots_month_by_month() {
    let engine = AggregationEngine::default();
    let source = StaticSource::from_json_str(EVENTS).unwrap();
    let timeline = engine.timeline(&source, "FRA");
    let control = Arc::new(PlaybackControl::new(&PlaybackConfig {
        frame_interval_ms: 500,
        loop_playback: false,
    }));

    let mut totals = Totals {
        engine,
        source,
        totals: Vec::new(),
    };
    let started = Instant::now();
    let result = run_playback(&timeline, &control, &mut totals).await.unwrap();

    assert_eq!(result.end_reason, PlaybackEndReason::Completed);
    assert_eq!(result.frames_emitted, 4);
    let counts: Vec<_> = totals.totals.iter().map(|&(_, total)| total).collect();
    assert_eq!(counts, [1, 1, 1, 2]);
    assert_eq!(started.elapsed(), Duration::from_millis(1_500));
}

#[tokio::test(start_paused = true)]
async fn external_stop_ends_looping_playback() {
    let timeline: Vec<MonthKey> = ["2020-01", "2020-02"]
        .iter()
        .map(|m| m.parse().unwrap())
        .collect();
    let control = Arc::new(PlaybackControl::new(&PlaybackConfig {
        frame_interval_ms: 1_000,
        loop_playback: true,
    }));

    let stopper = Arc::clone(&control);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        stopper.request_stop();
    });

    let mut count = Count(0);
    let result = run_playback(&timeline, &control, &mut count).await.unwrap();
    handle.await.unwrap();

    assert_eq!(result.end_reason, PlaybackEndReason::Stopped);
    // Frames at 0, 1, 2, 3 and 4 seconds; the stop lands during the wait
    // after the fifth.
    assert_eq!(result.frames_emitted, 5);
    assert_eq!(count.0, 5);
    assert_eq!(result.last_month, timeline.first().copied());
}
