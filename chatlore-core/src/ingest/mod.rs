//! Chat export ingestion.
//!
//! Reads a Telegram-style JSON export: a top-level object with a `messages`
//! array, each element carrying `from`, `date` and optionally `text`. The
//! `text` value may be a plain string or a list of fragments interleaving
//! strings with structured entities (mentions, links, formatting runs).
//!
//! # Error Handling
//!
//! - **Unreadable or non-JSON file**: fatal, returned as an error before any
//!   aggregation starts.
//! - **Malformed record** (missing sender, missing or unparseable date):
//!   silently skipped; the run continues with the next record. Skips are
//!   only visible as a debug-level log line and lower counts.

mod normalize;

pub use normalize::{normalize, Message};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Top-level shape of an exported chat log.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawExport {
    /// Chat name, when the exporter includes one.
    pub name: Option<String>,
    /// Raw records in export order. Order is load-bearing downstream.
    pub messages: Vec<RawRecord>,
}

/// One raw record from the `messages` array.
///
/// Every field is optional here; validation happens in [`normalize`].
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawRecord {
    /// Sender display name.
    pub from: Option<String>,
    /// ISO-8601 timestamp string, local or offset-carrying.
    pub date: Option<String>,
    /// Message text, plain or segmented.
    pub text: Option<RawText>,
}

/// The `text` field of a record: either one string or a fragment list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Plain(String),
    Segmented(Vec<TextFragment>),
}

/// One element of a segmented `text` value.
///
/// Entities keep only their display text; any other shape falls through to
/// `Other` and is stringified as raw JSON rather than failing the record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextFragment {
    Plain(String),
    Entity { text: String },
    Other(serde_json::Value),
}

/// Load and deserialize one export file.
pub fn load_export(path: &Path) -> Result<RawExport> {
    let file = File::open(path).map_err(|e| Error::Export {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let export = serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::Export {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(export)
}

/// Normalize every record in an export, dropping the malformed ones.
///
/// The returned sequence preserves export order.
pub fn normalize_export(export: &RawExport) -> Vec<Message> {
    let mut messages = Vec::with_capacity(export.messages.len());
    let mut skipped = 0usize;
    for record in &export.messages {
        match normalize(record) {
            Some(message) => messages.push(message),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, kept = messages.len(), "dropped malformed records");
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_export(json: &str) -> RawExport {
        serde_json::from_str(json).expect("export should deserialize")
    }

    #[test]
    fn test_plain_text_record() {
        let export = parse_export(
            r#"{"messages": [{"from": "Alice", "date": "2024-01-01T10:00:00", "text": "hi"}]}"#,
        );
        let messages = normalize_export(&export);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].text, "hi");
    }

    #[test]
    fn test_segmented_text_deserializes() {
        let export = parse_export(
            r#"{"messages": [{"from": "Alice", "date": "2024-01-01T10:00:00",
                "text": ["hello ", {"type": "mention", "text": "@bob"}, " there"]}]}"#,
        );
        assert_eq!(export.messages.len(), 1);
        assert!(matches!(
            export.messages[0].text,
            Some(RawText::Segmented(_))
        ));
    }

    #[test]
    fn test_unknown_fragment_shape_does_not_fail_the_record() {
        let export = parse_export(
            r#"{"messages": [{"from": "Alice", "date": "2024-01-01T10:00:00",
                "text": ["n = ", 42]}]}"#,
        );
        let messages = normalize_export(&export);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "n = 42");
    }

    #[test]
    fn test_extra_record_fields_are_ignored() {
        let export = parse_export(
            r#"{"name": "pals", "messages": [{"id": 7, "type": "message",
                "from": "Alice", "from_id": "user1", "date": "2024-01-01T10:00:00",
                "text": "hi"}]}"#,
        );
        assert_eq!(export.name.as_deref(), Some("pals"));
        assert_eq!(normalize_export(&export).len(), 1);
    }

    #[test]
    fn test_load_export_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(load_export(&path).is_err());
    }

    #[test]
    fn test_load_export_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_export(&dir.path().join("absent.json")).is_err());
    }
}
