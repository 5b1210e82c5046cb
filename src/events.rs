//! Conversation event detection.
//!
//! Parsed messages flow through three stages:
//!
//! 1. [`BurstSegmenter`] groups consecutive messages into dense bursts
//! 2. [`EventClassifier`] titles and scores each burst against a keyword
//!    taxonomy
//! 3. [`assign_messages`] links every message to the event whose time span
//!    contains it
//!
//! Every stage is a pure function of its input.

mod assign;
pub mod classify;
mod segment;
mod types;

pub use assign::assign_messages;
pub use classify::{EventClassifier, DEFAULT_CONFIDENCE, MATCHED_CONFIDENCE, TAXONOMY};
pub use segment::{BurstSegmenter, DEFAULT_MAX_GAP_MINUTES, DEFAULT_MIN_BURST_MESSAGES};
pub use types::{Burst, Category, Event};
