//! Derived metrics and report assembly.
//!
//! Everything here is a pure function of a finished [`Aggregates`] value;
//! the raw message sequence is never consulted again. Rankings select the
//! top K by descending count with ties broken by ascending token, so two
//! runs over the same export serialize byte-identically.

use super::aggregate::{Aggregates, SenderStats};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Entries kept in word rankings, overall and per sender.
pub const TOP_WORDS: usize = 10;
/// Entries kept in the words-before-emoji ranking.
pub const TOP_WORDS_BEFORE_EMOJI: usize = 10;

/// Derived statistics for one sender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderReport {
    /// Valid messages sent.
    pub messages: u64,
    /// Cumulative word count.
    pub words: u64,
    /// Cumulative character count, in Unicode scalar values.
    pub characters: u64,
    /// Number of distinct words ever used.
    pub distinct_words: u64,
    /// Words per message, exact division (messages is always >= 1).
    pub average_message_length: f64,
    /// Top words by frequency, at most [`TOP_WORDS`] entries.
    pub top_words: Vec<(String, u64)>,
    /// Total emoji occurrences.
    pub emoji_total: u64,
    /// Most frequent emoji, `None` when the sender never used one.
    pub top_emoji: Option<(String, u64)>,
    /// Messages sent strictly before 08:00 local time.
    pub conversation_starts: u64,
    /// Calendar days on which this sender was the only one active.
    pub exclusive_days: u64,
}

/// The assembled, immutable result of one analysis run.
///
/// Per-sender entries are keyed by sender name in sorted order; the hour
/// histogram is indexed 0..24 ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReport {
    /// Count of valid messages across all senders.
    pub valid_messages: u64,
    /// Inclusive day span from first to last active date; 0 with no data.
    pub total_days: u64,
    /// Days inside the span with no messages at all; 0 with no data.
    pub days_with_no_messages: u64,
    /// Distinct calendar dates with at least one message.
    pub active_days: u64,
    /// Per-sender derived statistics.
    pub senders: BTreeMap<String, SenderReport>,
    /// Message count per local hour of day, bucket 0 through 23.
    pub hourly_activity: [u64; 24],
    /// Top words across all senders, at most [`TOP_WORDS`] entries.
    pub top_words: Vec<(String, u64)>,
    /// Top words immediately preceding an emoji-leading token.
    pub top_words_before_emoji: Vec<(String, u64)>,
    /// Most frequent emoji overall, `None` when no emoji was ever seen.
    pub top_emoji: Option<(String, u64)>,
    /// Total emoji occurrences across all senders.
    pub emoji_total: u64,
    /// Inter-message gaps in seconds, one per sender change, export order.
    pub response_times_secs: Vec<i64>,
    /// Mean of the response-time samples, `None` when there are none.
    pub mean_response_secs: Option<f64>,
}

impl ChatReport {
    /// Derive every metric from a finished aggregate set.
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        let active_days = aggregates.active_days.len() as u64;
        let total_days = match (
            aggregates.active_days.keys().next(),
            aggregates.active_days.keys().next_back(),
        ) {
            (Some(first), Some(last)) => (*last - *first).num_days() as u64 + 1,
            _ => 0,
        };

        let mut overall_words: HashMap<String, u64> = HashMap::new();
        for stats in aggregates.senders.values() {
            for (word, count) in &stats.word_frequency {
                *overall_words.entry(word.clone()).or_insert(0) += count;
            }
        }

        let senders = aggregates
            .senders
            .iter()
            .map(|(name, stats)| (name.clone(), sender_report(name, stats, aggregates)))
            .collect();

        let mean_response_secs = if aggregates.response_times.is_empty() {
            None
        } else {
            let sum: i64 = aggregates.response_times.iter().sum();
            Some(sum as f64 / aggregates.response_times.len() as f64)
        };

        ChatReport {
            valid_messages: aggregates.valid_messages(),
            total_days,
            days_with_no_messages: total_days.saturating_sub(active_days),
            active_days,
            senders,
            hourly_activity: aggregates.hourly,
            top_words: top_k(&overall_words, TOP_WORDS),
            top_words_before_emoji: top_k(
                &aggregates.words_before_emoji,
                TOP_WORDS_BEFORE_EMOJI,
            ),
            top_emoji: top_emoji(&aggregates.emoji_frequency),
            emoji_total: aggregates.emoji_total,
            response_times_secs: aggregates.response_times.clone(),
            mean_response_secs,
        }
    }
}

fn sender_report(name: &str, stats: &SenderStats, aggregates: &Aggregates) -> SenderReport {
    let exclusive_days = aggregates
        .active_days
        .values()
        .filter(|senders| senders.len() == 1 && senders.contains(name))
        .count() as u64;

    SenderReport {
        messages: stats.messages,
        words: stats.words,
        characters: stats.characters,
        distinct_words: stats.distinct_words.len() as u64,
        average_message_length: stats.words as f64 / stats.messages as f64,
        top_words: top_k(&stats.word_frequency, TOP_WORDS),
        emoji_total: stats.emoji_total,
        top_emoji: top_emoji(&stats.emoji_frequency),
        conversation_starts: stats.conversation_starts,
        exclusive_days,
    }
}

/// Top `k` entries by descending count, ties broken by ascending key.
fn top_k<K: Ord + Clone>(frequency: &HashMap<K, u64>, k: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = frequency
        .iter()
        .map(|(key, &count)| (key.clone(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(k);
    entries
}

fn top_emoji(frequency: &HashMap<char, u64>) -> Option<(String, u64)> {
    top_k(frequency, 1)
        .into_iter()
        .next()
        .map(|(emoji, count)| (emoji.to_string(), count))
}
