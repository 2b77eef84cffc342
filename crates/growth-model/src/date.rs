//! Calendar dates and ages.
//!
//! Dates arrive as ISO 8601 extended dates (`YYYY-MM-DD`) from storage and as
//! `dd/mm/yyyy` from user-facing forms. Both are reduced to a [`CalendarDate`]
//! with no time-of-day component.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Earliest year accepted from the `dd/mm/yyyy` display format.
pub const MIN_DISPLAY_YEAR: i32 = 1900;

/// A date with year/month/day semantics, ordered by calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from components, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses an ISO 8601 extended date (`YYYY-MM-DD`).
    pub fn parse_iso(input: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ModelError::InvalidDate {
                input: input.to_string(),
                reason: "expected YYYY-MM-DD",
            })
    }

    /// Parses the `dd/mm/yyyy` display format.
    ///
    /// The input must have exactly three `/`-separated parts with day 1-31,
    /// month 1-12 and a year no earlier than [`MIN_DISPLAY_YEAR`].
    pub fn parse_display(input: &str) -> Result<Self> {
        let invalid = |reason| ModelError::InvalidDate {
            input: input.to_string(),
            reason,
        };
        let parts: Vec<&str> = input.trim().split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(invalid("expected dd/mm/yyyy"));
        };
        let day: u32 = day.trim().parse().map_err(|_| invalid("day is not a number"))?;
        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| invalid("month is not a number"))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| invalid("year is not a number"))?;

        if !(1..=31).contains(&day) {
            return Err(invalid("day out of range"));
        }
        if !(1..=12).contains(&month) {
            return Err(invalid("month out of range"));
        }
        if year < MIN_DISPLAY_YEAR {
            return Err(invalid("year before 1900"));
        }
        Self::from_ymd(year, month, day).ok_or_else(|| invalid("day does not exist in month"))
    }

    /// Formats the date as `dd/mm/yyyy`.
    pub fn to_display(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
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

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

/// A whole number of days of age. Never negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AgeInDays(u32);

impl AgeInDays {
    pub const ZERO: AgeInDays = AgeInDays(0);

    pub const fn new(days: u32) -> Self {
        Self(days)
    }

    pub const fn days(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl From<u32> for AgeInDays {
    fn from(days: u32) -> Self {
        Self(days)
    }
}

impl fmt::Display for AgeInDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
