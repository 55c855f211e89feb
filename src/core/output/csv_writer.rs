//! CSV output writer.

use std::fs;
use std::io;
use std::path::Path;

use super::ConversationRecord;
use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;

/// Converts conversation rows to CSV.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `timestamp`, `sender`, `message`
/// - Timestamp: `YYYY-MM-DD HH:MM`
pub fn to_csv(messages: &[&ChatMessage]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    for msg in messages {
        writer
            .serialize(ConversationRecord::from_message(msg))
            .map_err(write_error)?;
    }
    if messages.is_empty() {
        writer
            .write_record(["timestamp", "sender", "message"])
            .map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ChatStatsError::WriteFailure(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ChatStatsError::WriteFailure(io::Error::other(e)))
}

/// Writes conversation rows to a CSV file.
pub fn write_csv(messages: &[&ChatMessage], output_path: &Path) -> Result<()> {
    let csv = to_csv(messages)?;
    fs::write(output_path, csv).map_err(ChatStatsError::WriteFailure)
}

fn write_error(err: csv::Error) -> ChatStatsError {
    ChatStatsError::WriteFailure(io::Error::other(err))
}
