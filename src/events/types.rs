//! Data structures for detected conversation events.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use chrono::NaiveDateTime;

use crate::transcript::Message;

/// A run of consecutive messages with no gap above the burst threshold.
///
/// Stored as an index range into the parsed message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub range: Range<usize>,
}

impl Burst {
    pub fn new(range: Range<usize>) -> Self {
        Self { range }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The burst's messages within the full message list, `None` when the
    /// range falls outside it.
    pub fn messages<'a>(&self, all: &'a [Message]) -> Option<&'a [Message]> {
        all.get(self.range.clone())
    }
}

/// Event categories, in the order the classifier scans them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Meeting,
    Birthday,
    Wedding,
    Travel,
    Appointment,
    Payment,
    Celebration,
    /// Nothing in the taxonomy matched
    Conversation,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Meeting => "Meeting",
            Category::Birthday => "Birthday",
            Category::Wedding => "Wedding",
            Category::Travel => "Travel",
            Category::Appointment => "Appointment",
            Category::Payment => "Payment",
            Category::Celebration => "Celebration",
            Category::Conversation => "Conversation",
        }
    }

    /// Lower-case form used as the event tag.
    pub fn tag(self) -> String {
        self.label().to_ascii_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// `"{category} - {YYYY-MM-DD}"`
    pub title: String,
    pub category: Category,
    /// Timestamp of the burst's first message
    pub start: NaiveDateTime,
    /// Timestamp of the burst's last message
    pub end: NaiveDateTime,
    pub message_count: usize,
    pub keywords: BTreeSet<String>,
    pub confidence: f64,
}

impl Event {
    /// Inclusive interval containment.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
