//! # chatstats
//!
//! A Rust library for browsing CSV chat log exports and computing activity
//! statistics from them.
//!
//! ## Overview
//!
//! An export is a CSV file with the columns
//! `datetime, date, time, hour, weekday, sender, message`. chatstats:
//!
//! - resolves each row's locale-ambiguous `date`/`time` pair into a
//!   timestamp (day-first, see [`parsing::date`]),
//! - validates and sorts the rows ([`parser`]),
//! - derives per-sender counts, weekday averages, an hourly histogram,
//!   daily and monthly timelines, and word and phrase rankings
//!   ([`core::aggregate`]),
//! - keeps the loaded dataset, search term and active tab in an explicit
//!   [`Session`](session::Session).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = ChatCsvParser::new().parse("chat.csv".as_ref())?;
//!     let stats = aggregate(&messages);
//!
//!     println!("{}", render_stats(&stats));
//!     for sender in &stats.senders {
//!         println!("{}: {} messages", sender.sender, sender.messages);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing::date`] — Date Resolver
//! - [`parser`] — [`ChatCsvParser`](parser::ChatCsvParser), the Row Normalizer
//! - [`core`] — statistics and views
//!   - [`core::aggregate`] — [`aggregate`](core::aggregate::aggregate) → [`StatsBundle`](core::StatsBundle)
//!   - [`core::filter`] — [`ViewFilter`](core::ViewFilter)
//!   - [`core::output`] — JSON and CSV writers
//! - [`session`] — application state with serialized uploads
//! - [`report`] / [`format`] — text rendering and format selection
//! - [`config`] — [`IngestConfig`](config::IngestConfig), [`StatsConfig`](config::StatsConfig)
//! - [`error`] — [`ChatStatsError`], [`Result`]
//! - [`cli`] — clap argument types (feature `cli`)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod report;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatStatsError, Result};
pub use message::ChatMessage;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ChatMessage;
    pub use crate::error::{ChatStatsError, Result};

    pub use crate::config::{IngestConfig, StatsConfig};
    pub use crate::parser::ChatCsvParser;

    pub use crate::core::aggregate::{aggregate, aggregate_with};
    pub use crate::core::filter::ViewFilter;
    pub use crate::core::models::StatsBundle;

    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};

    pub use crate::format::ReportFormat;
    pub use crate::report::{render_conversation, render_stats};
    pub use crate::session::{Session, Tab};
}
