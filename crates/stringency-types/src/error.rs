//! Parse errors for the textual forms of shared types.

/// A string did not name any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {input:?}")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

/// Errors produced when constructing or parsing a [`MonthKey`].
///
/// [`MonthKey`]: crate::MonthKey
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthKeyError {
    /// The input is not a zero-padded `YYYY-MM` string.
    #[error("malformed month key {input:?}: expected zero-padded YYYY-MM")]
    Malformed {
        /// The rejected input.
        input: String,
    },

    /// The month component is outside `1..=12`.
    #[error("month {month} is out of range 1..=12")]
    MonthOutOfRange {
        /// The rejected month number.
        month: u32,
    },

    /// The year cannot be rendered as four digits.
    #[error("year {year} is out of range 0..=9999")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },
}

/// An event date was not a valid zero-padded `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventDateError {
    /// The input does not have the `YYYY-MM-DD` shape.
    #[error("malformed event date {input:?}: expected zero-padded YYYY-MM-DD")]
    Malformed {
        /// The rejected input.
        input: String,
    },

    /// The input has the right shape but names no calendar day.
    #[error("event date {input:?} is not a calendar day")]
    NotACalendarDay {
        /// The rejected input.
        input: String,
    },
}
