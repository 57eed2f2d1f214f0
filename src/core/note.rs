//! # Notes
//!
//! The unit of storage. A note has no identity beyond its position in the
//! collection at the time it is used.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A title/body pair stamped with the instant it was added.
///
/// Field order is the on-disk key order: `title`, `body`, `time_added`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub body: String,
    /// ISO-8601 instant, kept as the exact string read from disk so a
    /// load/save cycle never reformats it.
    pub time_added: String,
}

impl Note {
    /// Creates a note stamped with the current UTC instant.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            time_added: now_iso8601(),
        }
    }

    /// Case-insensitive substring test against the title.
    pub fn title_contains(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// A search hit paired with its 0-based position in the full collection.
///
/// Update and delete target the full collection, not the filtered view,
/// so the position is carried alongside the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMatch {
    pub position: usize,
    pub note: Note,
}

/// Current instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_new_note_timestamp_is_iso8601_utc() {
        let note = Note::new("title", "body");
        assert!(note.time_added.ends_with('Z'));
        assert_eq!(note.time_added.len(), "2024-01-01T00:00:00.000Z".len());
        assert!(DateTime::parse_from_rfc3339(&note.time_added).is_ok());
    }

    #[test]
    fn test_json_key_order() {
        let note = Note {
            title: "t".to_string(),
            body: "b".to_string(),
            time_added: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(
            json,
            r#"{"title":"t","body":"b","time_added":"2024-01-01T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_title_contains_ignores_case() {
        let note = Note::new("Shopping List", "");
        assert!(note.title_contains("shop"));
        assert!(note.title_contains("SHOPPING"));
        assert!(note.title_contains(""));
        assert!(!note.title_contains("groceries"));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result = serde_json::from_str::<Note>(r#"{"title":"t","body":"b"}"#);
        assert!(result.is_err());
    }
}
