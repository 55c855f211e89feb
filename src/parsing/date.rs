//! Date resolution for locale-ambiguous chat exports.
//!
//! Chat exports write dates the way the exporting phone was configured:
//! `20/05/2023`, `5-5-23`, ... There is no reliable marker for the component
//! order, so the resolver applies a fixed day-first heuristic:
//!
//! - a leading component above 12 can only be a day, so the date is read as
//!   day/month/year;
//! - otherwise day/month/year is *assumed*. Month-first dates whose day is
//!   <= 12 are therefore misread. This is kept as-is so that analytics stay
//!   comparable across versions; use [`is_ambiguous`] to find affected rows.
//!
//! Components outside their calendar range roll over the way a calendar
//! normalizer does (month 13 is January of the next year, day 0 is the last
//! day of the previous month).
//!
//! # Example
//!
//! ```
//! use chatstats::parsing::date::resolve;
//! use chrono::{Datelike, Timelike};
//!
//! let ts = resolve("20/05/2023", "14:30");
//! assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 5, 20));
//! assert_eq!((ts.hour(), ts.minute()), (14, 30));
//! ```

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Added to years below 100 (`23` becomes `2023`).
pub const TWO_DIGIT_YEAR_BASE: i64 = 2000;

/// Calendar components of an input date after the day-first heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

impl DateParts {
    /// Splits a `D/M/Y` or `D-M-Y` string into its components.
    ///
    /// Returns `None` unless the string has exactly three numeric parts.
    pub fn parse(date_str: &str) -> Option<Self> {
        let [first, second, third] = split_numeric(date_str)?;

        // Day first, whether or not `first > 12` makes it certain.
        let (day, month) = (first, second);
        let year = if third < 100 {
            third + TWO_DIGIT_YEAR_BASE
        } else {
            third
        };

        Some(Self { day, month, year })
    }

    /// Builds a naive timestamp, rolling over out-of-range components.
    pub fn at(self, hour: i64, minute: i64) -> Option<NaiveDateTime> {
        let total_months = self.year.checked_mul(12)?.checked_add(self.month - 1)?;
        let year = i32::try_from(total_months.div_euclid(12)).ok()?;
        let month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;

        NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_signed(Duration::try_days(self.day - 1)?)?
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::try_hours(hour)?)?
            .checked_add_signed(Duration::try_minutes(minute)?)
    }
}

/// Resolves a date/time pair into a naive local timestamp.
///
/// Falls back to the current wall-clock time when the date does not split
/// into three numeric components. Never fails.
pub fn resolve(date_str: &str, time_str: &str) -> NaiveDateTime {
    try_resolve(date_str, time_str).unwrap_or_else(|| Local::now().naive_local())
}

/// Like [`resolve`], but returns `None` instead of falling back to "now".
pub fn try_resolve(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let (hour, minute) = parse_time(time_str);
    DateParts::parse(date_str)?.at(hour, minute)
}

/// Parses `H:M[:S]` into `(hour, minute)`.
///
/// Seconds are ignored. Anything without numeric hour and minute parts
/// yields `(0, 0)`.
pub fn parse_time(time_str: &str) -> (i64, i64) {
    let mut parts = time_str.trim().split(':');
    let hour = parts.next().and_then(parse_component);
    let minute = parts.next().and_then(parse_component);

    match (hour, minute) {
        (Some(h), Some(m)) => (h, m),
        _ => (0, 0),
    }
}

/// Re-parses a raw date key as day/month/year, used to order daily buckets.
pub fn parse_day_month_year(date_str: &str) -> Option<NaiveDate> {
    DateParts::parse(date_str)?.at(0, 0).map(|dt| dt.date())
}

/// Sort key for a raw date string; unparseable dates sort to 1970-01-01.
pub fn day_sort_key(date_str: &str) -> NaiveDate {
    parse_day_month_year(date_str).unwrap_or_default()
}

/// Returns `true` when both leading components are <= 12, i.e. the date
/// reads equally well as day/month and month/day.
pub fn is_ambiguous(date_str: &str) -> bool {
    split_numeric(date_str).is_some_and(|[first, second, _]| first <= 12 && second <= 12)
}

fn split_numeric(date_str: &str) -> Option<[i64; 3]> {
    let mut parts = date_str.trim().split(|c: char| c == '/' || c == '-');
    let first = parse_component(parts.next()?)?;
    let second = parse_component(parts.next()?)?;
    let third = parse_component(parts.next()?)?;

    if parts.next().is_some() {
        return None;
    }
    Some([first, second, third])
}

fn parse_component(part: &str) -> Option<i64> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
