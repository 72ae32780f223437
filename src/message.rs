use chrono::Utc;
use serde::{Deserialize, Serialize};

/// ISO-8601 UTC timestamp without a timezone suffix. Fixed six fractional
/// digits keep lexicographic order equal to chronological order, which the
/// table's sort key relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A message within a channel. Write-once, append-only; the timestamp is
/// the sort key and is generated by the server at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub channel_id: String,
    pub timestamp_utc_iso8601: String,
    pub author: String,
    pub content: String,
}

impl Message {
    /// Build a message stamped with the current UTC time.
    pub fn new(
        channel_id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            timestamp_utc_iso8601: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            author: author.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn timestamp_is_iso8601_utc_without_offset() {
        let message = Message::new("c1", "alice", "hi");

        assert!(
            NaiveDateTime::parse_from_str(&message.timestamp_utc_iso8601, TIMESTAMP_FORMAT)
                .is_ok(),
            "unexpected timestamp format: {}",
            message.timestamp_utc_iso8601
        );
        assert!(!message.timestamp_utc_iso8601.ends_with('Z'));
        assert!(!message.timestamp_utc_iso8601.contains('+'));
    }

    #[test]
    fn consecutive_timestamps_are_monotone() {
        let first = Message::new("c1", "alice", "one");
        let second = Message::new("c1", "alice", "two");

        assert!(first.timestamp_utc_iso8601 <= second.timestamp_utc_iso8601);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let message = Message {
            channel_id: "c1".into(),
            timestamp_utc_iso8601: "2024-05-01T10:00:00.000000".into(),
            author: "alice".into(),
            content: "hi".into(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["channel_id"], "c1");
        assert_eq!(value["timestamp_utc_iso8601"], "2024-05-01T10:00:00.000000");
        assert_eq!(value["author"], "alice");
        assert_eq!(value["content"], "hi");
    }
}
