//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level CLI arguments
//! - [`Command`] - the `stats` and `view` subcommands
//! - [`OutputFormat`] - output format options, convertible to
//!   [`ReportFormat`](crate::format::ReportFormat)

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::core::filter::ViewFilter;
use crate::error::Result;

/// Browse a CSV chat log export and compute activity statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats stats chat.csv
    chatstats stats chat.csv -f json -o stats.json --days 14
    chatstats view chat.csv -s pizza --from Alice
    chatstats view chat.csv --after 2024-01-01 -f csv -o january.csv")]
pub struct Args {
    /// Log progress to stderr (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print activity statistics for a chat export
    Stats(StatsArgs),

    /// Print the conversation, optionally filtered
    View(ViewArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the CSV export
    pub input: PathBuf,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of top words to list
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub top_words: usize,

    /// Number of top phrases to list
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub top_phrases: usize,

    /// Number of most recent days in the daily timeline
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub days: usize,
}

impl StatsArgs {
    pub fn stats_config(&self) -> StatsConfig {
        StatsConfig::new()
            .with_top_words(self.top_words)
            .with_top_phrases(self.top_phrases)
            .with_daily_window(self.days)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// Path to the CSV export
    pub input: PathBuf,

    /// Only messages whose text or sender contains TERM (case-insensitive)
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Only messages from this sender (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Show only the N most recent matching messages
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ViewArgs {
    /// Builds the conversation filter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDate`](crate::ChatStatsError::InvalidDate) for a
    /// malformed `--after` or `--before`.
    pub fn filter(&self) -> Result<ViewFilter> {
        let mut filter = ViewFilter::new();
        if let Some(ref term) = self.search {
            filter = filter.with_search(term);
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from);
        }
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Pretty-printed JSON
    Json,

    /// CSV (conversation only)
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::ReportFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::ReportFormat {
    fn from(format: OutputFormat) -> crate::format::ReportFormat {
        match format {
            OutputFormat::Text => crate::format::ReportFormat::Text,
            OutputFormat::Json => crate::format::ReportFormat::Json,
            OutputFormat::Csv => crate::format::ReportFormat::Csv,
        }
    }
}
