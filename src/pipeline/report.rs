//! Output records for a successful pipeline run.
//!
//! These are the shapes handed to the persistence collaborator, serialized
//! with camelCase keys. Timestamps are naive ISO-8601 strings: the caller's
//! timezone label travels alongside but is never applied.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::transcript::{Message, ParseQuality};

/// Format used for every emitted timestamp.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// One message as emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub message_id: usize,
    #[serde(rename = "datetimeISO")]
    pub datetime_iso: String,
    pub author: String,
    pub text: String,
    pub attachments: Vec<String>,
    pub raw_line: String,
    /// Index into `events`, or `null` when no event contains the message
    pub event_id: Option<usize>,
}

impl MessageRecord {
    pub fn new(message: &Message, event_id: Option<usize>) -> Self {
        Self {
            message_id: message.id,
            datetime_iso: format_datetime(message.timestamp),
            author: message.author.clone(),
            text: message.text.clone(),
            attachments: message.attachments.clone(),
            raw_line: message.raw_line.clone(),
            event_id,
        }
    }
}

/// One event as emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_id: usize,
    pub title: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub message_count: usize,
    /// Matched keywords, sorted
    pub keywords: Vec<String>,
    pub confidence_score: f64,
    /// Lower-cased category
    pub tags: Vec<String>,
}

impl EventRecord {
    pub fn new(event_id: usize, event: &Event) -> Self {
        Self {
            event_id,
            title: event.title.clone(),
            start_datetime: format_datetime(event.start),
            end_datetime: format_datetime(event.end),
            message_count: event.message_count,
            keywords: event.keywords.iter().cloned().collect(),
            confidence_score: event.confidence,
            tags: vec![event.category.tag()],
        }
    }
}

/// Final artifact of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total_messages: usize,
    pub events_detected: usize,
    pub parse_success_rate: f64,
    /// Caller-declared timezone label (metadata only)
    pub timezone: String,
    pub messages: Vec<MessageRecord>,
    pub events: Vec<EventRecord>,
    /// Parser statistics, kept for human summaries
    #[serde(skip)]
    pub quality: ParseQuality,
}

impl AnalysisReport {
    /// Link messages and events into the emitted shape.
    ///
    /// `assignments[i]` is the event index for `messages[i]`.
    pub fn build(
        messages: &[Message],
        events: &[Event],
        assignments: &[Option<usize>],
        quality: ParseQuality,
        timezone: &str,
    ) -> Self {
        let message_records: Vec<MessageRecord> = messages
            .iter()
            .zip(assignments.iter().chain(std::iter::repeat(&None)))
            .map(|(message, event_id)| MessageRecord::new(message, *event_id))
            .collect();
        let event_records: Vec<EventRecord> = events
            .iter()
            .enumerate()
            .map(|(i, e)| EventRecord::new(i, e))
            .collect();

        Self {
            total_messages: message_records.len(),
            events_detected: event_records.len(),
            parse_success_rate: quality.success_rate(),
            timezone: timezone.to_string(),
            messages: message_records,
            events: event_records,
            quality,
        }
    }

    /// Messages with no containing event.
    pub fn unassigned_count(&self) -> usize {
        self.messages.iter().filter(|m| m.event_id.is_none()).count()
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
