//! Strict parsing of event dates.
//!
//! Event records carry their date as a zero-padded `YYYY-MM-DD` string.
//! chrono's own `NaiveDate` parser also accepts unpadded fields and leading
//! whitespace, so records go through [`parse_event_date`] instead.

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};

use crate::error::EventDateError;

/// Positions of the two separators in `YYYY-MM-DD`.
const SEPARATORS: [usize; 2] = [4, 7];

/// Length of a `YYYY-MM-DD` string.
const DATE_LEN: usize = 10;

/// Parse a zero-padded `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`EventDateError::Malformed`] if the input is not exactly ten
/// characters of digits with `-` at positions 4 and 7, or
/// [`EventDateError::NotACalendarDay`] for dates like `2021-02-29`.
pub fn parse_event_date(s: &str) -> Result<NaiveDate, EventDateError> {
    let well_formed = s.len() == DATE_LEN
        && s.bytes().enumerate().all(|(i, b)| {
            if SEPARATORS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
    if !well_formed {
        return Err(EventDateError::Malformed {
            input: s.to_owned(),
        });
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_err| EventDateError::NotACalendarDay {
        input: s.to_owned(),
    })
}

/// `deserialize_with` helper for event date fields.
pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    struct EventDateVisitor;

    impl Visitor<'_> for EventDateVisitor {
        type Value = NaiveDate;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a zero-padded YYYY-MM-DD date")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse_event_date(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_str(EventDateVisitor)
}
