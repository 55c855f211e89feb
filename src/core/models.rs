//! Derived statistics for a chat dataset.
//!
//! Every field of [`StatsBundle`] is a flat, ordered list of plain records so
//! that renderers and serializers can consume it without further lookups.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Message and word totals for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderStats {
    pub sender: String,
    pub messages: u64,
    pub words: u64,
}

/// Average messages per observed calendar day for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    /// English weekday name
    pub day: String,
    pub avg: f64,
    /// Messages sent on this weekday
    pub total: u64,
    /// Distinct dates observed for this weekday
    pub days: u64,
}

/// Messages sent during one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: u64,
}

/// Messages sent during one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// Messages sent on one raw date key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

/// Occurrences of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Occurrences of one two- or three-word phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: u64,
}

/// Complete analytics for one dataset.
///
/// Built in one go by [`aggregate`](crate::core::aggregate::aggregate) and
/// never updated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsBundle {
    pub total_messages: u64,
    pub total_words: u64,

    /// Earliest resolved timestamp
    pub first_message: Option<NaiveDateTime>,
    /// Latest resolved timestamp
    pub last_message: Option<NaiveDateTime>,

    /// Participants in order of first appearance
    pub senders: Vec<SenderStats>,
    /// Seven entries, Monday first, zeroed when nothing was observed
    pub weekday_averages: Vec<WeekdayAverage>,
    /// Twenty-four entries, hour 0 first
    pub hourly: Vec<HourCount>,
    /// Chronological, most recent days only
    pub daily: Vec<DayCount>,
    /// Chronological
    pub monthly: Vec<MonthCount>,
    pub top_words: Vec<WordCount>,
    pub top_phrases: Vec<PhraseCount>,
    pub most_active_day: Option<DayCount>,
}

impl StatsBundle {
    /// Returns `true` if the bundle was built from no messages.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Looks up one participant.
    pub fn sender(&self, name: &str) -> Option<&SenderStats> {
        self.senders.iter().find(|s| s.sender == name)
    }

    /// Count for a word in `top_words`, if it was ranked.
    pub fn word_count(&self, word: &str) -> Option<u64> {
        self.top_words.iter().find(|w| w.word == word).map(|w| w.count)
    }

    /// Count for a phrase in `top_phrases`, if it was ranked.
    pub fn phrase_count(&self, phrase: &str) -> Option<u64> {
        self.top_phrases
            .iter()
            .find(|p| p.phrase == phrase)
            .map(|p| p.count)
    }

    /// The hour with the most messages (earliest hour on ties).
    pub fn busiest_hour(&self) -> Option<HourCount> {
        self.hourly
            .iter()
            .copied()
            .filter(|h| h.count > 0)
            .fold(None, |best: Option<HourCount>, h| match best {
                Some(b) if b.count >= h.count => Some(b),
                _ => Some(h),
            })
    }
}
