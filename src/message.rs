//! The normalized chat row.
//!
//! [`ChatMessage`] is one row of a chat log export after normalization: the
//! raw columns exactly as they appeared in the file, plus a resolved
//! [`timestamp`](ChatMessage::timestamp).
//!
//! The `hour` and `weekday` columns are kept as supplied. They are never
//! derived from the timestamp, and a malformed value only removes the row from
//! the metric that needs it. Use [`hour_value`](ChatMessage::hour_value) and
//! [`weekday_value`](ChatMessage::weekday_value) for the typed views.
//!
//! # Examples
//!
//! ```
//! use chatstats::ChatMessage;
//!
//! let msg = ChatMessage::new("Alice", "Hello, world!")
//!     .with_date_time("20/05/2023", "14:30");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.timestamp().to_string(), "2023-05-20 14:30:00");
//! ```

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::parsing::date;

/// One message of a chat log, as read from the export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `datetime` | `String` | Raw `datetime` column, carried verbatim |
/// | `date` | `String` | Raw, locale-ambiguous calendar date |
/// | `time` | `String` | Raw `H:M[:S]` time |
/// | `hour` | `String` | Hour of day as supplied (`0`–`23`) |
/// | `weekday` | `String` | English weekday name as supplied |
/// | `sender` | `String` | Display name of the author |
/// | `message` | `String` | Message text, possibly empty |
/// | `timestamp` | `NaiveDateTime` | Resolved from `date` + `time` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Raw `datetime` column.
    pub datetime: String,

    /// Raw calendar date, e.g. `20/05/2023` or `5-5-23`.
    pub date: String,

    /// Raw time of day, e.g. `14:30` or `14:30:05`.
    pub time: String,

    /// Hour of day as supplied by the export.
    pub hour: String,

    /// Weekday name as supplied by the export (`Monday` ... `Sunday`).
    pub weekday: String,

    /// Display name of the message author.
    pub sender: String,

    /// Message text.
    pub message: String,

    /// Resolved point in time (naive, no timezone).
    pub timestamp: NaiveDateTime,
}

impl ChatMessage {
    /// Creates a message with only sender and text.
    ///
    /// Date and time columns are empty and the timestamp is the Unix epoch;
    /// use [`with_date_time`](Self::with_date_time) to fill them in.
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            datetime: String::new(),
            date: String::new(),
            time: String::new(),
            hour: String::new(),
            weekday: String::new(),
            sender: sender.into(),
            message: message.into(),
            timestamp: NaiveDateTime::default(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the raw date and time and re-resolves the timestamp.
    ///
    /// The `datetime` column is set to `"{date} {time}"`.
    #[must_use]
    pub fn with_date_time(mut self, date_str: impl Into<String>, time_str: impl Into<String>) -> Self {
        self.date = date_str.into();
        self.time = time_str.into();
        self.datetime = format!("{} {}", self.date, self.time);
        self.timestamp = date::resolve(&self.date, &self.time);
        self
    }

    /// Sets the raw `hour` column.
    #[must_use]
    pub fn with_hour(mut self, hour: impl Into<String>) -> Self {
        self.hour = hour.into();
        self
    }

    /// Sets the raw `weekday` column.
    #[must_use]
    pub fn with_weekday(mut self, weekday: impl Into<String>) -> Self {
        self.weekday = weekday.into();
        self
    }

    /// Overrides the resolved timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = ts;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the raw date string.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the resolved timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the supplied hour if it is an integer in `0..=23`.
    pub fn hour_value(&self) -> Option<u8> {
        self.hour.trim().parse::<u8>().ok().filter(|h| *h < 24)
    }

    /// Returns the supplied weekday if it is a full English weekday name.
    ///
    /// Matching is exact: `"Monday"` is recognized, `"monday"` and `"Mon"`
    /// are not.
    pub fn weekday_value(&self) -> Option<Weekday> {
        parse_weekday(&self.weekday)
    }

    /// Number of whitespace-delimited words in the message.
    pub fn word_count(&self) -> usize {
        self.message.split_whitespace().count()
    }

    /// Returns `true` if the message text is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// English weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parses a full, capitalized English weekday name.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let index = WEEKDAY_NAMES.iter().position(|w| *w == name)?;
    Some(WEEKDAYS[index])
}

/// Returns the full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}
