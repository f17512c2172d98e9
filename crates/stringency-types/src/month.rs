//! Calendar month keys.
//!
//! A [`MonthKey`] names one calendar month and is rendered as zero-padded
//! `YYYY-MM`. It is both the unit of the dashboard timeline and the cutoff
//! granularity for "active as of" queries.
//!
//! # Design Principles
//!
//! - The key stores the first day of its month, so ordering is chronological
//!   and matches the lexicographic order of the `YYYY-MM` rendering.
//! - Month lengths are derived from the calendar, never stored.
//! - Constructors that take user input reject anything that would not
//!   render as exactly seven characters.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::MonthKeyError;

/// Highest year accepted by [`MonthKey::new`] and [`MonthKey::from_str`].
const MAX_YEAR: i32 = 9999;

/// A calendar year-month such as `2020-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// Create a month key from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`MonthKeyError::MonthOutOfRange`] if `month` is not in
    /// `1..=12`, or [`MonthKeyError::YearOutOfRange`] if `year` is not in
    /// `0..=9999`.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(MonthKeyError::YearOutOfRange { year });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(MonthKeyError::MonthOutOfRange { month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date))
    }

    /// Calendar year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-based.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First calendar day of the month.
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Number of days in the month, accounting for leap years.
    pub fn days_in_month(self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Last calendar day of the month.
    ///
    /// This is the inclusive cutoff date used by snapshot queries.
    pub fn last_day(self) -> NaiveDate {
        self.0.with_day(self.days_in_month()).unwrap_or(self.0)
    }

    /// Whether `date` falls inside this month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// The following calendar month, or `None` at the end of the
    /// representable date range.
    pub fn succ(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The preceding calendar month, or `None` at the start of the
    /// representable date range.
    pub fn pred(self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }
}

/// Gregorian leap-year rule.
const fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MonthKeyError::Malformed {
            input: s.to_owned(),
        };

        let (year, month) = s.split_once('-').ok_or_else(malformed)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let year: i32 = year.parse().map_err(|_err| malformed())?;
        let month: u32 = month.parse().map_err(|_err| malformed())?;
        Self::new(year, month)
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MonthKeyVisitor;

        impl Visitor<'_> for MonthKeyVisitor {
            type Value = MonthKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a zero-padded YYYY-MM month key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(MonthKeyVisitor)
    }
}
