//! Report format types for the chatstats library.
//!
//! These types don't depend on CLI frameworks; the `chatstats` binary maps
//! its `--format` flag onto [`ReportFormat`].
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::aggregate::aggregate;
//! use chatstats::format::{ReportFormat, stats_to_string};
//! use chatstats::ChatMessage;
//!
//! let messages = vec![ChatMessage::new("Alice", "Hello!").with_date_time("1/1/2023", "10:00")];
//! let stats = aggregate(&messages);
//!
//! let json = stats_to_string(&stats, ReportFormat::Json)?;
//! assert!(json.contains("total_messages"));
//!
//! let format = ReportFormat::from_path("stats.json")?;
//! assert_eq!(format, ReportFormat::Json);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::StatsBundle;
use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;
use crate::report;

/// Output format for reports and conversation exports.
///
/// - [`Text`](ReportFormat::Text) - human-readable report with bar charts
/// - [`Json`](ReportFormat::Json) - the raw records, for charting tools
/// - [`Csv`](ReportFormat::Csv) - conversation export only
///
/// # Example
///
/// ```rust
/// use chatstats::format::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("csv").unwrap();
/// assert_eq!(format, ReportFormat::Csv);
/// assert_eq!(format.extension(), "csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Plain text (default)
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,

    /// CSV with `timestamp,sender,message` columns
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Text, ReportFormat::Json, ReportFormat::Csv]
    }

    /// Returns `true` if a statistics report can be rendered in this format.
    pub fn supports_stats(&self) -> bool {
        !matches!(self, ReportFormat::Csv)
    }

    /// Detects the format from a file extension.
    ///
    /// ```rust
    /// use chatstats::format::ReportFormat;
    ///
    /// assert_eq!(ReportFormat::from_path("out/report.TXT").unwrap(), ReportFormat::Text);
    /// assert!(ReportFormat::from_path("report.xml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(ChatStatsError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, json, csv"),
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Renders a statistics bundle.
///
/// # Errors
///
/// Returns [`InvalidFormat`](ChatStatsError::InvalidFormat) for
/// [`ReportFormat::Csv`], or when JSON is requested without the
/// `json-output` feature.
pub fn stats_to_string(stats: &StatsBundle, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(report::render_stats(stats)),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::to_json(stats, true),
        #[allow(unreachable_patterns)]
        _ => Err(unsupported("stats", format)),
    }
}

/// Renders a conversation view.
///
/// # Errors
///
/// Returns an error if the format needs a disabled feature or if writing
/// the CSV fails.
pub fn conversation_to_string(messages: &[&ChatMessage], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(report::render_conversation(messages)),
        ReportFormat::Csv => crate::core::output::to_csv(messages),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::conversation_to_json(messages),
        #[allow(unreachable_patterns)]
        _ => Err(unsupported("conversation", format)),
    }
}

fn unsupported(target: &'static str, format: ReportFormat) -> ChatStatsError {
    let message = match format {
        ReportFormat::Json => "JSON output requires the 'json-output' feature".to_string(),
        other => format!("{other} is not available for this report"),
    };
    ChatStatsError::invalid_format(target, message)
}
