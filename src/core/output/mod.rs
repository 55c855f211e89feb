//! Output writers.
//!
//! - [`write_json`] / [`to_json`] - the [`StatsBundle`](crate::core::models::StatsBundle)
//!   or a conversation as JSON - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - a conversation as CSV
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::core::aggregate::aggregate;
//! use chatstats::core::output::{to_csv, to_json};
//! use chatstats::ChatMessage;
//!
//! let messages = vec![
//!     ChatMessage::new("Alice", "Hello!").with_date_time("1/1/2023", "10:00"),
//!     ChatMessage::new("Bob", "Hi there!").with_date_time("1/1/2023", "10:01"),
//! ];
//!
//! let json = to_json(&aggregate(&messages), true)?;
//! assert!(json.contains("\"total_messages\": 2"));
//!
//! let rows: Vec<&ChatMessage> = messages.iter().collect();
//! let csv = to_csv(&rows)?;
//! assert!(csv.starts_with("timestamp,sender,message"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

use serde::Serialize;

use crate::message::ChatMessage;

pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{conversation_to_json, to_json, write_json};

/// Timestamp format used in conversation exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One exported conversation line.
#[derive(Debug, Serialize)]
pub struct ConversationRecord<'a> {
    pub timestamp: String,
    pub sender: &'a str,
    pub message: &'a str,
}

impl<'a> ConversationRecord<'a> {
    pub fn from_message(msg: &'a ChatMessage) -> Self {
        Self {
            timestamp: msg.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            sender: &msg.sender,
            message: &msg.message,
        }
    }
}
