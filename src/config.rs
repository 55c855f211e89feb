//! Configuration types for ingestion and aggregation.
//!
//! Plain structs for library usage, without any CLI framework dependencies.
//!
//! - [`IngestConfig`] - how the CSV export is read
//! - [`StatsConfig`] - limits used by the aggregator
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{IngestConfig, StatsConfig};
//! use chatstats::parser::ChatCsvParser;
//!
//! let parser = ChatCsvParser::with_config(IngestConfig::new().with_delimiter(b';'));
//! let stats = StatsConfig::new().with_top_words(10).with_daily_window(14);
//! assert_eq!(stats.top_words, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for reading a chat log CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,

    /// Drop records whose fields are all blank (default: true)
    pub skip_blank_rows: bool,

    /// Reject paths that do not end in `.csv` (default: true)
    pub require_csv_extension: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_blank_rows: true,
            require_csv_extension: true,
        }
    }
}

impl IngestConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether all-blank records are dropped.
    #[must_use]
    pub fn with_skip_blank_rows(mut self, skip: bool) -> Self {
        self.skip_blank_rows = skip;
        self
    }

    /// Sets whether the `.csv` extension is enforced.
    #[must_use]
    pub fn with_require_csv_extension(mut self, require: bool) -> Self {
        self.require_csv_extension = require;
        self
    }
}

/// Limits used when building a [`StatsBundle`](crate::core::models::StatsBundle).
///
/// The defaults are the values the conversation report is designed around;
/// changing them changes results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Number of words kept in `top_words` (default: 30)
    pub top_words: usize,

    /// Number of phrases kept in `top_phrases` (default: 30)
    pub top_phrases: usize,

    /// Number of most recent days kept in the daily timeline (default: 30)
    pub daily_window: usize,

    /// Phrases seen fewer times than this are dropped (default: 3)
    pub min_phrase_count: u64,

    /// Shortest word counted in word frequency, in chars (default: 3)
    pub min_word_len: usize,

    /// Shortest token used to build phrases, in chars (default: 2)
    pub min_phrase_token_len: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_words: 30,
            top_phrases: 30,
            daily_window: 30,
            min_phrase_count: 3,
            min_word_len: 3,
            min_phrase_token_len: 2,
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of top words kept.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the number of top phrases kept.
    #[must_use]
    pub fn with_top_phrases(mut self, n: usize) -> Self {
        self.top_phrases = n;
        self
    }

    /// Sets the number of days kept in the daily timeline.
    #[must_use]
    pub fn with_daily_window(mut self, days: usize) -> Self {
        self.daily_window = days;
        self
    }

    /// Sets the minimum number of occurrences for a phrase to be ranked.
    #[must_use]
    pub fn with_min_phrase_count(mut self, count: u64) -> Self {
        self.min_phrase_count = count;
        self
    }
}
