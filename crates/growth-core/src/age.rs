//! Age calculation and formatting.
//!
//! Ages are whole days between two calendar dates. The difference is taken
//! as an absolute value, so a measurement dated before the date of birth
//! yields a positive age instead of an error.
//!
//! Formatting uses a fixed 365-day year and 30-day month. Stored ages and
//! chart tooltips depend on these exact strings.

use chrono::TimeDelta;
use growth_model::{AgeInDays, CalendarDate, Child, Measurement, MeasurementValues};

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Days in a year for formatting purposes.
pub const DAYS_PER_YEAR: u32 = 365;

/// Days in a month for formatting purposes.
pub const DAYS_PER_MONTH: u32 = 30;

/// Whole days between `date_of_birth` and `measurement_date`.
///
/// Computes `ceil(|measurement_date - date_of_birth| / 1 day)`. Total over
/// any two valid dates; never negative.
pub fn age_in_days(date_of_birth: CalendarDate, measurement_date: CalendarDate) -> AgeInDays {
    let elapsed: TimeDelta = measurement_date
        .as_naive()
        .signed_duration_since(date_of_birth.as_naive());
    let days = elapsed
        .num_milliseconds()
        .unsigned_abs()
        .div_ceil(MILLIS_PER_DAY);
    AgeInDays::new(u32::try_from(days).unwrap_or(u32::MAX))
}

/// Human-readable age, e.g. `29 days`, `1m 5d`, `2 months`, `1y 1m`, `2 years`.
pub fn format_age(age: AgeInDays) -> String {
    let days = age.days();
    let years = days / DAYS_PER_YEAR;
    let remainder = days % DAYS_PER_YEAR;
    let months = remainder / DAYS_PER_MONTH;
    let leftover_days = remainder % DAYS_PER_MONTH;

    if years > 0 {
        if months > 0 {
            format!("{years}y {months}m")
        } else {
            format!("{years} year{}", plural(years))
        }
    } else if months > 0 {
        if leftover_days > 0 {
            format!("{months}m {leftover_days}d")
        } else {
            format!("{months} month{}", plural(months))
        }
    } else {
        format!("{days} day{}", plural(days))
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Build a measurement for `child`, caching its age at `date`.
pub fn measurement_for(
    child: &Child,
    id: impl Into<String>,
    date: CalendarDate,
    values: MeasurementValues,
) -> Measurement {
    let age = age_in_days(child.date_of_birth, date);
    Measurement::new(id, date, age, values)
}
