//! Calendar date value used as the key for every vacation date-set operation.
//!
//! Dates cross the store boundary as zero-padded `YYYY-MM-DD` strings. The
//! parser is strict: it rejects anything that does not round-trip exactly.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("malformed date string: {0:?} (expected YYYY-MM-DD)")]
    Malformed(String),
    #[error("invalid year/month: {year}/{month}")]
    InvalidPeriod { year: i32, month: u32 },
}

/// Week bucket key.
///
/// Weeks follow ISO-8601: they start on Monday and belong to the ISO year
/// that contains their Thursday. `year` is that ISO year, which differs from
/// the calendar year for a few days around New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekOfYear {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for WeekOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// An immutable (year, month, day) triple that is always calendar-valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::InvalidDate { year, month, day });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Every date of the given month, in ascending order.
    pub fn days_in_month(year: i32, month: u32) -> Result<Vec<Self>, DateError> {
        let first = Self::new(year, month, 1)
            .map_err(|_| DateError::InvalidPeriod { year, month })?;

        let mut days = Vec::with_capacity(31);
        let mut cursor = first.0;
        while cursor.month() == month {
            days.push(Self(cursor));
            match cursor.succ_opt() {
                Some(next) => cursor = next,
                None => break,
            }
        }
        Ok(days)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn week_of_year(&self) -> WeekOfYear {
        let iso = self.0.iso_week();
        WeekOfYear {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn is_in_period(&self, year: i32, month: u32) -> bool {
        self.year() == year && self.month() == month
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DateError::Malformed(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(malformed());
        }

        let year: i32 = s[0..4].parse().map_err(|_| malformed())?;
        let month: u32 = s[5..7].parse().map_err(|_| malformed())?;
        let day: u32 = s[8..10].parse().map_err(|_| malformed())?;

        Self::new(year, month, day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
