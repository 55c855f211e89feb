//! Reading and normalizing chat log CSV exports.
//!
//! [`ChatCsvParser`] validates that the export carries every column in
//! [`REQUIRED_COLUMNS`], resolves a timestamp for each row and returns the
//! rows sorted by that timestamp. Extra columns are ignored.
//!
//! # Example
//!
//! ```rust
//! use chatstats::parser::ChatCsvParser;
//!
//! let csv = "datetime,date,time,hour,weekday,sender,message\n\
//!            2023-05-21 09:00,21/05/2023,09:00,9,Sunday,Bob,later\n\
//!            2023-05-20 14:30,20/05/2023,14:30,14,Saturday,Alice,earlier\n";
//!
//! let messages = ChatCsvParser::new().parse_str(csv)?;
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].sender, "Alice");
//! # Ok::<(), chatstats::ChatStatsError>(())
//! ```
//!
//! # Failure modes
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Path is not a `.csv` file | [`UnsupportedFileType`](ChatStatsError::UnsupportedFileType) |
//! | Header lacks required columns | [`MissingColumns`](ChatStatsError::MissingColumns) |
//! | Record with the wrong number of fields | [`ParseFailure`](ChatStatsError::ParseFailure) |
//! | File cannot be read | [`ReadFailure`](ChatStatsError::ReadFailure) |
//! | Unparseable date in a row | row kept, timestamp falls back to "now" |

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::config::IngestConfig;
use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;
use crate::parsing::date;

/// Columns every export must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "datetime", "date", "time", "hour", "weekday", "sender", "message",
];

/// One CSV record, before timestamp resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    pub datetime: String,
    pub date: String,
    pub time: String,
    pub hour: String,
    pub weekday: String,
    pub sender: String,
    pub message: String,
}

impl RawRow {
    /// Resolves the timestamp and produces the normalized message.
    pub fn into_message(self) -> ChatMessage {
        let timestamp = date::resolve(&self.date, &self.time);
        ChatMessage {
            datetime: self.datetime,
            date: self.date,
            time: self.time,
            hour: self.hour,
            weekday: self.weekday,
            sender: self.sender,
            message: self.message,
            timestamp,
        }
    }
}

/// Parser for chat log CSV exports.
#[derive(Debug, Clone, Default)]
pub struct ChatCsvParser {
    config: IngestConfig,
}

impl ChatCsvParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Checks the file type, reads the file and normalizes its rows.
    pub fn parse(&self, path: &Path) -> Result<Vec<ChatMessage>> {
        self.check_file_type(path)?;
        let bytes = fs::read(path)?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        self.parse_bytes(&bytes)
    }

    /// Returns [`UnsupportedFileType`](ChatStatsError::UnsupportedFileType)
    /// for paths without a `.csv` extension, unless the check is disabled.
    pub fn check_file_type(&self, path: &Path) -> Result<()> {
        if self.config.require_csv_extension && !is_csv_path(path) {
            return Err(ChatStatsError::unsupported_file_type(path));
        }
        Ok(())
    }

    /// Normalizes an in-memory upload. The bytes must be UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<ChatMessage>> {
        let content = std::str::from_utf8(bytes).map_err(|source| ChatStatsError::Utf8 {
            context: "CSV input".to_string(),
            source,
        })?;
        self.parse_str(content)
    }

    /// Normalizes CSV content held in a string.
    pub fn parse_str(&self, content: &str) -> Result<Vec<ChatMessage>> {
        self.parse_reader(content.as_bytes())
    }

    /// Normalizes CSV content from any reader.
    ///
    /// Fails before producing any row if a required column is missing.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<ChatMessage>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        check_columns(headers.iter())?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        let mut record = csv::StringRecord::new();
        while rdr.read_record(&mut record)? {
            if self.config.skip_blank_rows && record.iter().all(|f| f.trim().is_empty()) {
                skipped += 1;
                continue;
            }
            let row: RawRow = record.deserialize(Some(&headers))?;
            rows.push(row);
        }

        if skipped > 0 {
            log::debug!("skipped {skipped} blank records");
        }
        Ok(normalize(rows))
    }
}

/// Fails with [`MissingColumns`](ChatStatsError::MissingColumns) naming every
/// required column absent from `headers`. Matching is exact and
/// case-sensitive.
pub fn check_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = headers.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ChatStatsError::missing_columns(missing))
    }
}

/// Resolves timestamps and stable-sorts rows ascending by timestamp.
///
/// Rows with equal timestamps keep their input order.
pub fn normalize(rows: Vec<RawRow>) -> Vec<ChatMessage> {
    let mut fallbacks = 0usize;
    let mut ambiguous = 0usize;
    for row in &rows {
        if date::DateParts::parse(&row.date).is_none() {
            fallbacks += 1;
        } else if date::is_ambiguous(&row.date) {
            ambiguous += 1;
        }
    }

    let mut messages: Vec<ChatMessage> = rows.into_iter().map(RawRow::into_message).collect();
    messages.sort_by_key(|m| m.timestamp);

    if fallbacks > 0 {
        log::warn!("{fallbacks} rows have an unparseable date; their timestamp is the load time");
    }
    log::debug!(
        "normalized {} rows ({ambiguous} dates read day-first by assumption)",
        messages.len()
    );
    messages
}

/// Returns `true` if the path has a `.csv` extension (case-insensitive).
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
