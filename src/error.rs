//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatStatsError`] enum that covers every
//! failure an upload or an output operation can hit. Row-level anomalies
//! (unparseable dates, out-of-range hours, unknown weekdays) are *not* errors:
//! they only degrade the affected metric.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - Every error is recoverable: a [`Session`](crate::session::Session) keeps
//!   its previously loaded dataset when an upload fails

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::ChatMessage;
///
/// fn my_function() -> Result<Vec<ChatMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatStatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatStatsError {
    /// The selected file is not a CSV file.
    #[error("Unsupported file type: {}. Expected a .csv file", path.display())]
    UnsupportedFileType {
        /// The rejected path
        path: PathBuf,
    },

    /// The header row lacks one or more of the required columns.
    ///
    /// Nothing is ingested when this happens.
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Names of the missing columns, in canonical column order
        missing: Vec<String>,
    },

    /// The CSV reader reported a structural error (a record with the wrong
    /// number of fields, an invalid header, ...).
    #[error("Failed to parse CSV{}: {source}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    ParseFailure {
        /// Line where the error was detected, if known
        line: Option<u64>,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// Reading the input failed.
    #[error("Failed to read input: {0}")]
    ReadFailure(#[from] io::Error),

    /// Writing a report or export failed.
    #[error("Failed to write output: {0}")]
    WriteFailure(#[source] io::Error),

    /// File content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// Invalid date in a conversation filter.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unknown or unsupported output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which report the format was requested for
        format: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// An upload was started while another one is still pending.
    #[error("Another upload is already in progress")]
    UploadInProgress,

    /// An upload was completed with a ticket that is no longer current.
    #[error("Upload ticket #{ticket} is no longer valid")]
    StaleUpload {
        /// Sequence number of the rejected ticket
        ticket: u64,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatStatsError {
    /// Creates an unsupported file type error.
    pub fn unsupported_file_type(path: impl Into<PathBuf>) -> Self {
        ChatStatsError::UnsupportedFileType { path: path.into() }
    }

    /// Creates a missing columns error.
    pub fn missing_columns<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChatStatsError::MissingColumns {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Wraps a CSV error, extracting the line number when the reader knows it.
    pub fn parse_failure(source: csv::Error) -> Self {
        let line = source.position().map(csv::Position::line);
        ChatStatsError::ParseFailure { line, source }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatStatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatStatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an unsupported file type error.
    pub fn is_unsupported_file_type(&self) -> bool {
        matches!(self, ChatStatsError::UnsupportedFileType { .. })
    }

    /// Returns `true` if this is a missing columns error.
    pub fn is_missing_columns(&self) -> bool {
        matches!(self, ChatStatsError::MissingColumns { .. })
    }

    /// Returns `true` if this is a CSV parse error.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ChatStatsError::ParseFailure { .. })
    }

    /// Returns `true` if this is an I/O read error.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, ChatStatsError::ReadFailure(_))
    }

    /// Returns `true` if writing output failed.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, ChatStatsError::WriteFailure(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatStatsError::InvalidDate { .. })
    }

    /// Returns the missing column names for a [`MissingColumns`](ChatStatsError::MissingColumns) error.
    pub fn missing(&self) -> Option<&[String]> {
        match self {
            ChatStatsError::MissingColumns { missing } => Some(missing),
            _ => None,
        }
    }
}

impl From<csv::Error> for ChatStatsError {
    fn from(err: csv::Error) -> Self {
        // The csv crate reports file-level I/O problems through its own
        // error type; keep them distinct from structural parse errors.
        if err.is_io_error() {
            ChatStatsError::ReadFailure(io::Error::other(err))
        } else {
            ChatStatsError::parse_failure(err)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
