//! Chat transcript parsing.
//!
//! Turns an exported chat log into an ordered list of [`Message`]s.
//!
//! # Structure
//!
//! - [`normalize`] - direction-mark and whitespace cleanup per line
//! - [`grammar`] - header dialects (bracketed, dashed, ISO)
//! - [`timestamp`] - date/time resolution with year pivot and 12-hour clock
//! - `parser` - the line-by-line state machine and parse statistics
//!
//! # Example
//!
//! ```
//! use chatburst::transcript::{ParserOptions, TranscriptParser};
//!
//! let parser = TranscriptParser::new(ParserOptions::now());
//! let parsed = parser.parse("[15/01/2024, 10:00:00] Alice: hi\nsecond line");
//! assert_eq!(parsed.messages.len(), 1);
//! assert_eq!(parsed.messages[0].text, "hi\nsecond line");
//! ```

pub mod grammar;
pub mod normalize;
mod parser;
pub mod timestamp;
mod types;

pub use grammar::{HeaderMatch, LineGrammar, LineShape};
pub use parser::{ParserOptions, TranscriptParser, DEFAULT_FAILED_LINE_SAMPLES};
pub use timestamp::TimestampResolver;
pub use types::{FailedLine, Message, ParseQuality, ParsedTranscript, TimestampSource};
