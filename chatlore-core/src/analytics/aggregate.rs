//! Single-pass streaming aggregation.
//!
//! [`Aggregates`] is folded over the normalized message sequence in export
//! order. Order is load-bearing: response-time sampling and the
//! previous-sender state depend on consuming messages exactly as exported,
//! never re-sorted. After the pass the value is read-only; derived metrics
//! live in [`super::report`].

use crate::emoji;
use crate::ingest::Message;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Messages sent strictly before this hour count as conversation starters.
const STARTER_HOUR: u32 = 8;

/// Running counters for one sender.
///
/// Created lazily on the sender's first valid message and mutated
/// monotonically; message count is therefore always at least 1.
#[derive(Debug, Clone, Default)]
pub struct SenderStats {
    /// Valid messages sent.
    pub messages: u64,
    /// Cumulative whitespace-delimited word count.
    pub words: u64,
    /// Cumulative character count of trimmed text, in Unicode scalar values.
    pub characters: u64,
    /// Distinct words ever used, case-sensitive.
    pub distinct_words: HashSet<String>,
    /// Word frequency map.
    pub word_frequency: HashMap<String, u64>,
    /// Emoji frequency map, keyed by single code point.
    pub emoji_frequency: HashMap<char, u64>,
    /// Total emoji occurrences.
    pub emoji_total: u64,
    /// Messages sent strictly before 08:00 local time.
    pub conversation_starts: u64,
}

/// All cross-message state of the single pass.
#[derive(Debug, Clone)]
pub struct Aggregates {
    /// Per-sender running counters, keyed by sender name.
    pub senders: HashMap<String, SenderStats>,
    /// Calendar date to the set of senders active on it.
    pub active_days: BTreeMap<NaiveDate, BTreeSet<String>>,
    /// Message count per local hour of day.
    pub hourly: [u64; 24],
    /// Global emoji frequency map.
    pub emoji_frequency: HashMap<char, u64>,
    /// Global emoji total.
    pub emoji_total: u64,
    /// Frequency of words whose following token leads with an emoji.
    pub words_before_emoji: HashMap<String, u64>,
    /// Inter-message gaps in seconds, sampled only on sender changes.
    /// Negative values are possible when the export is not sorted; they are
    /// recorded as-is.
    pub response_times: Vec<i64>,
    previous: Option<(String, NaiveDateTime)>,
}

impl Default for Aggregates {
    fn default() -> Self {
        Self {
            senders: HashMap::new(),
            active_days: BTreeMap::new(),
            hourly: [0; 24],
            emoji_frequency: HashMap::new(),
            emoji_total: 0,
            words_before_emoji: HashMap::new(),
            response_times: Vec::new(),
            previous: None,
        }
    }
}

impl Aggregates {
    /// Fold a message sequence into a fresh aggregate set.
    pub fn collect<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut aggregates = Aggregates::default();
        for message in messages {
            aggregates.observe(message);
        }
        aggregates
    }

    /// Feed one valid message into the running counters.
    pub fn observe(&mut self, message: &Message) {
        self.active_days
            .entry(message.timestamp.date())
            .or_default()
            .insert(message.sender.clone());
        self.hourly[message.timestamp.hour() as usize] += 1;

        let stats = self.senders.entry(message.sender.clone()).or_default();
        stats.messages += 1;
        if message.timestamp.hour() < STARTER_HOUR {
            stats.conversation_starts += 1;
        }

        if !message.text.is_empty() {
            let words: Vec<&str> = message.text.split_whitespace().collect();
            stats.words += words.len() as u64;
            stats.characters += message.text.chars().count() as u64;
            for &word in &words {
                stats.distinct_words.insert(word.to_string());
                *stats.word_frequency.entry(word.to_string()).or_insert(0) += 1;
            }

            for found in emoji::emojis_in(&message.text) {
                *stats.emoji_frequency.entry(found).or_insert(0) += 1;
                *self.emoji_frequency.entry(found).or_insert(0) += 1;
                stats.emoji_total += 1;
                self.emoji_total += 1;
            }

            for pair in words.windows(2) {
                if emoji::starts_with_emoji(pair[1]) {
                    *self
                        .words_before_emoji
                        .entry(pair[0].to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        if let Some((previous_sender, previous_time)) = &self.previous {
            if previous_sender != &message.sender {
                self.response_times
                    .push((message.timestamp - *previous_time).num_seconds());
            }
        }
        self.previous = Some((message.sender.clone(), message.timestamp));
    }

    /// Count of valid messages seen, summed over senders.
    pub fn valid_messages(&self) -> u64 {
        self.senders.values().map(|s| s.messages).sum()
    }
}
