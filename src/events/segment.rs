//! Burst segmentation.
//!
//! One linear pass over the messages in file order. A message joins the
//! running buffer when it arrives within `max_gap` of the buffer's last
//! message; otherwise the buffer is committed (if it holds at least
//! `min_messages`) or dropped, and a new buffer starts. Bursts are never
//! merged and the scan never looks back.

use chrono::Duration;

use super::types::Burst;
use crate::transcript::Message;

/// Default maximum gap between consecutive messages of a burst.
pub const DEFAULT_MAX_GAP_MINUTES: i64 = 10;

/// Default minimum number of messages for a burst to count.
pub const DEFAULT_MIN_BURST_MESSAGES: usize = 5;

/// Splits a message sequence into temporally dense bursts.
#[derive(Debug, Clone)]
pub struct BurstSegmenter {
    max_gap: Duration,
    min_messages: usize,
}

impl BurstSegmenter {
    pub fn new(max_gap: Duration, min_messages: usize) -> Self {
        Self {
            max_gap,
            min_messages,
        }
    }

    /// Segment `messages`. The returned ranges are disjoint and ascending.
    pub fn segment(&self, messages: &[Message]) -> Vec<Burst> {
        let mut bursts = Vec::new();
        if messages.is_empty() {
            return bursts;
        }

        // The buffer is always messages[start..i]
        let mut start = 0;
        for i in 1..messages.len() {
            let gap = messages[i].timestamp - messages[i - 1].timestamp;
            if gap <= self.max_gap {
                continue;
            }
            self.commit(&mut bursts, start, i);
            start = i;
        }
        self.commit(&mut bursts, start, messages.len());

        tracing::debug!(
            messages = messages.len(),
            bursts = bursts.len(),
            "segmented messages into bursts"
        );
        bursts
    }

    fn commit(&self, bursts: &mut Vec<Burst>, start: usize, end: usize) {
        if end - start >= self.min_messages {
            bursts.push(Burst::new(start..end));
        }
    }
}

impl Default for BurstSegmenter {
    fn default() -> Self {
        Self::new(
            Duration::minutes(DEFAULT_MAX_GAP_MINUTES),
            DEFAULT_MIN_BURST_MESSAGES,
        )
    }
}
