//! Message-to-event assignment by timestamp interval.

use super::types::Event;
use crate::transcript::Message;

/// For each message, the index of the first event (in discovery order)
/// whose inclusive `[start, end]` interval contains its timestamp.
///
/// This is a direct O(messages × events) scan. A message that fell into a
/// discarded short buffer can still land in an event when timestamps in the
/// export are out of order; containment is the only rule.
pub fn assign_messages(messages: &[Message], events: &[Event]) -> Vec<Option<usize>> {
    let assignments: Vec<Option<usize>> = messages
        .iter()
        .map(|message| events.iter().position(|e| e.contains(message.timestamp)))
        .collect();

    tracing::debug!(
        messages = messages.len(),
        assigned = assignments.iter().filter(|a| a.is_some()).count(),
        "assigned messages to events"
    );
    assignments
}
