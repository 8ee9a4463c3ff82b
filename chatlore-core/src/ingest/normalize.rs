//! Raw-record validation and text flattening.

use super::{RawRecord, RawText, TextFragment};
use chrono::{DateTime, NaiveDateTime};

/// A validated message: known sender, parsed timestamp, flattened text.
///
/// Only values of this type reach the aggregator; a record that cannot be
/// turned into one affects no counter anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Sender display name, used as the aggregation key.
    pub sender: String,
    /// Wall-clock timestamp in the chat's local time.
    pub timestamp: NaiveDateTime,
    /// Flattened, trimmed text. May be empty.
    pub text: String,
}

/// Validate one raw record.
///
/// Returns `None` when the sender is absent/empty or the timestamp does not
/// parse. Text is optional; a valid record without text normalizes to an
/// empty string.
pub fn normalize(record: &RawRecord) -> Option<Message> {
    let sender = record.from.as_deref()?.trim();
    if sender.is_empty() {
        return None;
    }
    let timestamp = parse_timestamp(record.date.as_deref()?)?;
    let text = record.text.as_ref().map(flatten_text).unwrap_or_default();
    Some(Message {
        sender: sender.to_string(),
        timestamp,
        text,
    })
}

/// Parse an ISO-8601 timestamp, naive-local or offset-carrying.
///
/// Exporters write `date` in the chat's local time; when an offset is
/// present the local wall-clock reading is kept, so hour-of-day and
/// before-8am semantics stay in local terms.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Flatten a plain-or-segmented text value into one string.
///
/// Fragments are stringified, trimmed, and joined with a single space;
/// empty fragments vanish. Plain text is trimmed only.
fn flatten_text(text: &RawText) -> String {
    match text {
        RawText::Plain(s) => s.trim().to_string(),
        RawText::Segmented(fragments) => fragments
            .iter()
            .map(fragment_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn fragment_text(fragment: &TextFragment) -> String {
    match fragment {
        TextFragment::Plain(s) => s.clone(),
        TextFragment::Entity { text } => text.clone(),
        TextFragment::Other(value) => value.to_string(),
    }
}
