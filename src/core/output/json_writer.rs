//! JSON output writer.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::ConversationRecord;
use crate::error::{ChatStatsError, Result};
use crate::message::ChatMessage;

/// Serializes any report value (usually a `StatsBundle`) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Writes a report value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    let json = to_json(value, true)?;
    fs::write(output_path, json).map_err(ChatStatsError::WriteFailure)
}

/// Converts conversation rows to a JSON array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2023-05-20 14:30", "sender": "Alice", "message": "Hello"}
/// ]
/// ```
pub fn conversation_to_json(messages: &[&ChatMessage]) -> Result<String> {
    let records: Vec<ConversationRecord<'_>> = messages
        .iter()
        .map(|m| ConversationRecord::from_message(m))
        .collect();
    to_json(&records, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::aggregate;

    #[test]
    fn test_stats_json_shape() {
        let rows = vec![
            ChatMessage::new("Alice", "hello there")
                .with_date_time("1/1/2023", "10:00")
                .with_hour("10")
                .with_weekday("Sunday"),
        ];
        let json = to_json(&aggregate(&rows), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_messages"], 1);
        assert_eq!(value["hourly"][10]["hour"], 10);
        assert_eq!(value["hourly"][10]["count"], 1);
        assert_eq!(value["weekday_averages"][6]["day"], "Sunday");
        assert_eq!(value["weekday_averages"][6]["avg"], 1.0);
        assert_eq!(value["top_words"][0]["word"], "hello");
        assert_eq!(value["most_active_day"]["date"], "1/1/2023");
    }

    #[test]
    fn test_conversation_to_json() {
        let msg = ChatMessage::new("Alice", "Hi \"you\"").with_date_time("20/05/2023", "14:30");
        let json = conversation_to_json(&[&msg]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["timestamp"], "2023-05-20 14:30");
        assert_eq!(value[0]["sender"], "Alice");
        assert_eq!(value[0]["message"], "Hi \"you\"");
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        write_json(&aggregate(&[]), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"total_messages\": 0"));
    }

    #[test]
    fn test_write_json_bad_path() {
        let err = write_json(&aggregate(&[]), Path::new("/no/such/dir/stats.json")).unwrap_err();
        assert!(err.is_write_failure());
    }
}
