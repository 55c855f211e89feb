//! Filter the conversation view by search term, sender and date range.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Search | [`with_search`](ViewFilter::with_search) | Substring of message text or sender |
//! | Sender | [`with_sender`](ViewFilter::with_sender) | Messages from one participant |
//! | Date from | [`with_date_from`](ViewFilter::with_date_from) | Messages on or after a date |
//! | Date to | [`with_date_to`](ViewFilter::with_date_to) | Messages on or before a date |
//!
//! # Examples
//!
//! ```
//! use chatstats::core::filter::ViewFilter;
//! use chatstats::ChatMessage;
//!
//! # fn main() -> chatstats::Result<()> {
//! let messages = vec![
//!     ChatMessage::new("Alice", "See you at the Station").with_date_time("1/6/2024", "10:00"),
//!     ChatMessage::new("Bob", "ok").with_date_time("2/6/2024", "11:00"),
//!     ChatMessage::new("alice", "station again?").with_date_time("3/7/2024", "12:00"),
//! ];
//!
//! let filter = ViewFilter::new()
//!     .with_search("station")
//!     .with_date_to("2024-06-30")?;
//!
//! let view = filter.apply(&messages);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].message, "See you at the Station");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Matching is case-insensitive (full Unicode lower-casing)
//! - Date bounds compare against the resolved timestamp and are inclusive
//! - Multiple filters are combined with AND logic
//! - The result keeps dataset order

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;

/// Criteria for the conversation view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Lower-cased search needle.
    pub search: Option<String>,

    /// Lower-cased sender name.
    pub sender: Option<String>,

    /// Include only messages at or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages at or before this timestamp.
    pub before: Option<NaiveDateTime>,
}

impl ViewFilter {
    /// Creates a filter that lets every message through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps messages whose text or sender contains `term`.
    ///
    /// A blank term clears the search.
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    /// Keeps messages from `sender` only.
    #[must_use]
    pub fn with_sender(mut self, sender: &str) -> Self {
        self.sender = Some(sender.to_lowercase());
        self
    }

    /// Sets the start date (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatStatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_filter_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date (inclusive, through 23:59:59). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatStatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let end = parse_filter_date(date_str)?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatStatsError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Returns `true` if any criterion is set.
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.sender.is_some() || self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active criterion.
    pub fn matches(&self, msg: &ChatMessage) -> bool {
        if let Some(ref sender) = self.sender {
            if msg.sender.to_lowercase() != *sender {
                return false;
            }
        }
        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }
        if let Some(ref needle) = self.search {
            if !msg.message.to_lowercase().contains(needle.as_str())
                && !msg.sender.to_lowercase().contains(needle.as_str())
            {
                return false;
            }
        }
        true
    }

    /// Borrows the matching messages, in dataset order.
    pub fn apply<'a>(&self, messages: &'a [ChatMessage]) -> Vec<&'a ChatMessage> {
        messages.iter().filter(|m| self.matches(m)).collect()
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatStatsError::invalid_date(date_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(sender: &str, text: &str, date: &str) -> ChatMessage {
        ChatMessage::new(sender, text).with_date_time(date, "12:00")
    }

    fn sample() -> Vec<ChatMessage> {
        vec![
            make_msg("Alice", "Hello there", "1/1/2024"),
            make_msg("Bob", "hi", "15/6/2024"),
            make_msg("alice", "HELLO again", "20/6/2024"),
        ]
    }

    #[test]
    fn test_inactive_filter_keeps_everything() {
        let messages = sample();
        let filter = ViewFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&messages).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let messages = sample();
        let view = ViewFilter::new().with_search("hello").apply(&messages);
        assert_eq!(view.len(), 2);
        assert_eq!(view[1].message, "HELLO again");
    }

    #[test]
    fn test_search_matches_sender() {
        let messages = sample();
        let view = ViewFilter::new().with_search("BOB").apply(&messages);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].sender, "Bob");
    }

    #[test]
    fn test_blank_search_is_inactive() {
        assert!(!ViewFilter::new().with_search("   ").is_active());
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = sample();
        let view = ViewFilter::new().with_sender("ALICE").apply(&messages);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|m| m.sender.eq_ignore_ascii_case("alice")));
    }

    #[test]
    fn test_date_range_inclusive() {
        let messages = sample();
        let filter = ViewFilter::new()
            .with_date_from("2024-06-15")
            .unwrap()
            .with_date_to("2024-06-20")
            .unwrap();
        let view = filter.apply(&messages);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].sender, "Bob");
    }

    #[test]
    fn test_combined_filters() {
        let messages = sample();
        let filter = ViewFilter::new()
            .with_sender("alice")
            .with_search("hello")
            .with_date_from("2024-02-01")
            .unwrap();
        let view = filter.apply(&messages);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].message, "HELLO again");
    }

    #[test]
    fn test_invalid_date() {
        let err = ViewFilter::new().with_date_from("15/06/2024").unwrap_err();
        assert!(err.is_invalid_date());
        assert!(ViewFilter::new().with_date_to("2024-13-01").is_err());
    }
}
