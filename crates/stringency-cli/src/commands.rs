//! Subcommand handlers.
//!
//! Each handler takes already-loaded configuration and an event source and
//! returns the JSON document the subcommand prints. Keeping them free of
//! I/O lets them be tested without spawning the binary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stringency_engine::config::{DashboardConfig, DatasetConfig};
use stringency_engine::playback::{self, PlaybackControl, PlaybackResult};
use stringency_engine::scale::ColorScale;
use stringency_engine::{AggregationEngine, EventSource, SampleSource, StaticSource, sample, stats};
use stringency_types::{GlobalStats, Metric, MonthKey, Region, ScaleLegend};
use tracing::{info, warn};

use crate::error::CliError;
use crate::frame_logger::FrameLogger;

/// Open the configured event source: the JSON file when one is set,
/// otherwise the seeded sample.
pub fn open_source(dataset: &DatasetConfig) -> Result<Box<dyn EventSource>, CliError> {
    match &dataset.events_path {
        Some(path) => Ok(Box::new(StaticSource::from_json_file(path)?)),
        None => Ok(Box::new(SampleSource::generate(dataset.seed))),
    }
}

/// `timeline <SUBJECT>`: the subject's months as `YYYY-MM` strings.
pub fn timeline(
    engine: &AggregationEngine,
    source: &dyn EventSource,
    subject: &str,
) -> Result<String, CliError> {
    let months = engine.timeline(source, subject);
    Ok(serde_json::to_string_pretty(&months)?)
}

/// `snapshot <SUBJECT> <MONTH>`: per-category counts at the end of `month`.
pub fn snapshot(
    engine: &AggregationEngine,
    source: &dyn EventSource,
    subject: &str,
    month: MonthKey,
) -> Result<String, CliError> {
    let snapshot = engine.snapshot(source, subject, month);
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// `series <SUBJECT>`: active-policy counts for every timeline month.
pub fn series(
    engine: &AggregationEngine,
    source: &dyn EventSource,
    subject: &str,
) -> Result<String, CliError> {
    let series = engine.series(source, subject);
    Ok(serde_json::to_string_pretty(&series)?)
}

/// One row of the regional ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRegion {
    /// The region.
    pub region: Region,
    /// Its value for the ranked metric.
    pub value: u64,
    /// `value` formatted for chart labels.
    pub label: String,
}

/// Output of the `stats` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Metric used for ranking and the map scale.
    pub metric: Metric,
    /// When the figures were generated.
    pub last_updated: DateTime<Utc>,
    /// Worldwide totals.
    pub global: GlobalStats,
    /// Regions, largest first.
    pub regions: Vec<RankedRegion>,
    /// Per-million map legend.
    pub legend: ScaleLegend,
}

/// Build the overview statistics for the sample dataset.
pub fn stats_report(seed: u64, metric: Metric, as_of: DateTime<Utc>) -> StatsReport {
    let dataset = sample::generate_dataset(seed, as_of);
    let regions = stats::rank_regions(&dataset.regions, metric)
        .into_iter()
        .map(|r| {
            let value = r.metric(metric);
            RankedRegion {
                region: r.region,
                value,
                label: stats::format_compact(value),
            }
        })
        .collect();

    StatsReport {
        metric,
        last_updated: dataset.last_updated,
        global: dataset.global,
        regions,
        legend: ColorScale::sequential(&dataset.countries, metric).legend(),
    }
}

/// `stats [--metric M]`: overview figures for the sample dataset.
pub fn overview(config: &DashboardConfig, metric: Metric) -> Result<String, CliError> {
    let report = stats_report(config.dataset.seed, metric, Utc::now());
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `play <SUBJECT>`: step through the subject's timeline, logging the
/// policy total of each frame. Ctrl-C stops playback cleanly.
pub async fn play(
    engine: &AggregationEngine,
    source: &dyn EventSource,
    subject: &str,
    control: Arc<PlaybackControl>,
) -> Result<PlaybackResult, CliError> {
    let timeline = engine.timeline(source, subject);

    let stopper = Arc::clone(&control);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping playback");
            stopper.request_stop();
        } else {
            warn!("Unable to listen for interrupt, playback runs to completion");
        }
    });

    let mut logger = FrameLogger::new(engine, source, subject);
    let result = playback::run_playback(&timeline, &control, &mut logger).await;
    ctrl_c.abort();

    let result = result?;
    playback::log_playback_end(&result);
    Ok(result)
}
