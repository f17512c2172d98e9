//! Point-in-time policy snapshots.
//!
//! A snapshot answers "which policies had a subject implemented by the end
//! of month M?" grouped by category. It is recomputed from the raw events
//! on every call and never cached.
//!
//! # Invariants
//!
//! - Every [`PolicyCategory`] appears exactly once, zero-count categories
//!   included.
//! - The cutoff month resolves to its last calendar day; events on or
//!   before that day are counted.
//! - Events with unrecognized category labels never reach a category
//!   entry. They are listed in [`PolicySnapshot::unrecognized`] instead.

use std::collections::BTreeMap;

use stringency_types::{
    CategorySnapshot, MonthKey, PolicyCategory, PolicyEvent, PolicySnapshot, SeriesPoint,
};
use tracing::{debug, warn};

use crate::timeline;

/// Compute the snapshot of `subject`'s policies active as of the end of
/// `cutoff`.
///
/// Never fails: a subject with no events yields every category at zero.
pub fn compute_snapshot(events: &[PolicyEvent], subject: &str, cutoff: MonthKey) -> PolicySnapshot {
    let cutoff_date = cutoff.last_day();

    let mut categories: BTreeMap<PolicyCategory, CategorySnapshot> = PolicyCategory::ALL
        .into_iter()
        .map(|category| (category, CategorySnapshot::empty(category)))
        .collect();
    let mut unrecognized = Vec::new();

    for event in events
        .iter()
        .filter(|e| e.subject == subject && e.date <= cutoff_date)
    {
        match event.known_category() {
            Some(category) => {
                let entry = categories
                    .entry(category)
                    .or_insert_with(|| CategorySnapshot::empty(category));
                entry.events.push(event.clone());
                entry.count = entry.events.len();
            }
            None => unrecognized.push(event.clone()),
        }
    }

    if !unrecognized.is_empty() {
        warn!(
            subject,
            cutoff = %cutoff,
            dropped = unrecognized.len(),
            "events with unrecognized categories excluded from snapshot"
        );
    }

    let snapshot = PolicySnapshot {
        subject: subject.to_owned(),
        cutoff,
        cutoff_date,
        categories,
        unrecognized,
    };

    debug!(
        subject,
        cutoff = %cutoff,
        total = snapshot.total(),
        "snapshot computed"
    );
    snapshot
}

/// Compute active-policy counts for every distinct month in `months`.
///
/// The result is sorted ascending with duplicates removed, whatever the
/// order of `months`. Each point holds the counts [`compute_snapshot`]
/// would give for that month, computed in a single sweep over the
/// subject's events sorted by date.
pub fn compute_series_for(
    events: &[PolicyEvent],
    subject: &str,
    months: &[MonthKey],
) -> Vec<SeriesPoint> {
    let mut dated: Vec<_> = events
        .iter()
        .filter(|e| e.subject == subject)
        .filter_map(|e| e.known_category().map(|category| (e.date, category)))
        .collect();
    dated.sort_unstable_by_key(|&(date, _)| date);

    let mut counts: BTreeMap<PolicyCategory, usize> =
        PolicyCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    let mut total: usize = 0;
    let mut pending = dated.into_iter().peekable();
    let mut series = Vec::with_capacity(months.len());

    let mut ordered = months.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    for month in ordered {
        let cutoff_date = month.last_day();
        while let Some((_, category)) = pending.next_if(|&(date, _)| date <= cutoff_date) {
            if let Some(count) = counts.get_mut(&category) {
                *count = count.saturating_add(1);
            }
            total = total.saturating_add(1);
        }
        series.push(SeriesPoint {
            month,
            total,
            counts: counts.clone(),
        });
    }

    series
}

/// Compute active-policy counts for every month of `subject`'s default
/// timeline.
pub fn compute_series(events: &[PolicyEvent], subject: &str) -> Vec<SeriesPoint> {
    let months = timeline::compute_timeline(events, subject);
    compute_series_for(events, subject, &months)
}
