//! Core processing logic for chatstats.
//!
//! This module contains:
//! - [`aggregate`] - Builds the [`StatsBundle`] from normalized rows
//! - [`text`] - Text cleaning and frequency tables shared by word/phrase stats
//! - [`models`] - The statistic records
//! - [`filter`] - Conversation view filtering
//! - [`output`] - Format writers (JSON, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() {
//! use chatstats::core::{StatsBundle, ViewFilter, aggregate, to_csv, to_json};
//! # }
//! ```

pub mod aggregate;
pub mod filter;
pub mod models;
pub mod output;
pub mod text;

pub use aggregate::{aggregate, aggregate_with};
pub use filter::ViewFilter;
pub use models::{
    DayCount, HourCount, MonthCount, PhraseCount, SenderStats, StatsBundle, WeekdayAverage,
    WordCount,
};

pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{conversation_to_json, to_json, write_json};
