//! Month timeline derivation.
//!
//! The timeline is the list of months a viewer can step through for one
//! subject: every calendar month from the subject's earliest event to its
//! latest event, inclusive and without gaps. Months with no events still
//! appear. A subject without events gets a fixed fallback range so the
//! dashboard always has something to render.

use stringency_types::{MonthKey, PolicyEvent};
use tracing::debug;

use crate::config::default_fallback_months;

/// Earliest and latest event month for `subject`, or `None` if the subject
/// has no events.
pub fn subject_span(events: &[PolicyEvent], subject: &str) -> Option<(MonthKey, MonthKey)> {
    events
        .iter()
        .filter(|e| e.subject == subject)
        .map(|e| e.date)
        .fold(None, |span, date| match span {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        })
        .map(|(min, max)| (MonthKey::from_date(min), MonthKey::from_date(max)))
}

/// Every month from `start` to `end`, inclusive, one calendar month apart.
///
/// Returns an empty vector when `start > end`.
pub fn months_between(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let mut cursor = Some(start);
    while let Some(month) = cursor {
        if month > end {
            break;
        }
        months.push(month);
        cursor = month.succ();
    }
    months
}

/// Compute the navigable timeline for `subject` using the default
/// fallback range (`2020-01`, `2020-02`).
///
/// The result is ascending, contiguous, and never empty.
pub fn compute_timeline(events: &[PolicyEvent], subject: &str) -> Vec<MonthKey> {
    compute_timeline_with_fallback(events, subject, &default_fallback_months())
}

/// Compute the navigable timeline for `subject`, returning `fallback` when
/// the subject has no events.
///
/// An empty `fallback` is replaced by the default range so the result is
/// never empty.
pub fn compute_timeline_with_fallback(
    events: &[PolicyEvent],
    subject: &str,
    fallback: &[MonthKey],
) -> Vec<MonthKey> {
    let Some((first, last)) = subject_span(events, subject) else {
        debug!(subject, "no events for subject, using fallback timeline");
        if fallback.is_empty() {
            return default_fallback_months();
        }
        return fallback.to_vec();
    };

    let months = months_between(first, last);
    debug!(
        subject,
        first = %first,
        last = %last,
        months = months.len(),
        "timeline computed"
    );
    months
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn event(subject: &str, date: &str) -> PolicyEvent {
        PolicyEvent::new(
            subject,
            "national",
            "School Closures",
            date.parse::<NaiveDate>().unwrap(),
        )
    }

    fn render(months: &[MonthKey]) -> Vec<String> {
        months.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn spans_first_to_last_month() {
        let events = vec![
            event("USA", "2020-12-21"),
            event("USA", "2020-03-15"),
            event("USA", "2020-07-01"),
        ];
        let months = compute_timeline(&events, "USA");
        assert_eq!(months.len(), 10);
        assert_eq!(months.first().unwrap().to_string(), "2020-03");
        assert_eq!(months.last().unwrap().to_string(), "2020-12");
    }

    #[test]
    fn single_month_span() {
        let events = vec![event("FRA", "2021-05-02"), event("FRA", "2021-05-30")];
        assert_eq!(render(&compute_timeline(&events, "FRA")), ["2021-05"]);
    }

    #[test]
    fn crosses_year_boundary_without_gaps() {
        let events = vec![event("DEU", "2020-11-10"), event("DEU", "2021-02-01")];
        assert_eq!(
            render(&compute_timeline(&events, "DEU")),
            ["2020-11", "2020-12", "2021-01", "2021-02"]
        );
    }

    #[test]
    fn ignores_other_subjects() {
        let events = vec![event("USA", "2020-03-15"), event("BRA", "2019-01-01")];
        assert_eq!(render(&compute_timeline(&events, "USA")), ["2020-03"]);
    }

    #[test]
    fn unknown_subject_gets_fallback() {
        let events = vec![event("USA", "2020-03-15")];
        assert_eq!(
            render(&compute_timeline(&events, "ZZZ")),
            ["2020-01", "2020-02"]
        );
        assert_eq!(render(&compute_timeline(&[], "USA")), ["2020-01", "2020-02"]);
    }

    #[test]
    fn custom_fallback_is_used() {
        let fallback = vec![MonthKey::new(2022, 6).unwrap()];
        assert_eq!(
            compute_timeline_with_fallback(&[], "USA", &fallback),
            fallback
        );
    }

    #[test]
    fn empty_fallback_is_replaced_by_default() {
        let months = compute_timeline_with_fallback(&[], "USA", &[]);
        assert_eq!(render(&months), ["2020-01", "2020-02"]);
    }

    #[test]
    fn months_between_inverted_range_is_empty() {
        let a = MonthKey::new(2020, 5).unwrap();
        let b = MonthKey::new(2020, 4).unwrap();
        assert!(months_between(a, b).is_empty());
    }
}
