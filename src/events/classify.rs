//! Keyword classification of bursts into titled events.
//!
//! Categories are scanned in declared order and the first category with any
//! keyword present in the burst text wins. Matching is a plain substring
//! test on the lower-cased, space-joined message texts.

use std::collections::BTreeSet;

use super::types::{Burst, Category, Event};
use crate::transcript::Message;

/// Confidence assigned when a taxonomy category matched.
pub const MATCHED_CONFIDENCE: f64 = 0.8;

/// Confidence assigned to the `Conversation` fallback.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Fixed keyword taxonomy in scan order.
pub const TAXONOMY: &[(Category, &[&str])] = &[
    (
        Category::Meeting,
        &["meeting", "conference", "zoom", "agenda", "standup"],
    ),
    (Category::Birthday, &["birthday", "bday", "cake", "candles"]),
    (
        Category::Wedding,
        &["wedding", "bride", "groom", "ceremony", "engagement"],
    ),
    (
        Category::Travel,
        &["flight", "airport", "hotel", "trip", "vacation", "luggage"],
    ),
    (
        Category::Appointment,
        &["appointment", "doctor", "dentist", "clinic", "checkup"],
    ),
    (
        Category::Payment,
        &["payment", "invoice", "paid", "bill", "refund", "transfer"],
    ),
    (
        Category::Celebration,
        &["celebrate", "congrats", "congratulations", "party", "cheers"],
    ),
];

/// Scores bursts against [`TAXONOMY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClassifier;

impl EventClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one non-empty burst.
    ///
    /// Returns `None` for an empty burst, which the segmenter never
    /// produces, or one whose range lies outside `messages`.
    pub fn classify(&self, messages: &[Message], burst: &Burst) -> Option<Event> {
        let slice = burst.messages(messages)?;
        let first = slice.first()?;
        let last = slice.last()?;

        let text = slice
            .iter()
            .map(|m| m.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let (category, keywords) = match_taxonomy(&text);
        let confidence = if category == Category::Conversation {
            DEFAULT_CONFIDENCE
        } else {
            MATCHED_CONFIDENCE
        };

        Some(Event {
            title: format!("{} - {}", category, first.timestamp.format("%Y-%m-%d")),
            category,
            start: first.timestamp,
            end: last.timestamp,
            message_count: slice.len(),
            keywords,
            confidence,
        })
    }

    /// Classify every burst, preserving order.
    pub fn classify_all(&self, messages: &[Message], bursts: &[Burst]) -> Vec<Event> {
        bursts
            .iter()
            .filter_map(|burst| self.classify(messages, burst))
            .collect()
    }
}

/// First category with a keyword in `text`, plus that category's matched
/// keywords. Falls back to `Conversation` with no keywords.
pub fn match_taxonomy(text: &str) -> (Category, BTreeSet<String>) {
    for (category, keywords) in TAXONOMY {
        let matched: BTreeSet<String> = keywords
            .iter()
            .filter(|k| text.contains(*k))
            .map(|k| k.to_string())
            .collect();
        if !matched.is_empty() {
            return (*category, matched);
        }
    }
    (Category::Conversation, BTreeSet::new())
}
