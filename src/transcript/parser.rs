//! Stateful transcript parser.
//!
//! Walks physical lines in file order with two states:
//!
//! - `NoCurrentMessage`: a line that is not a header is a parse error
//!   (system notices excepted)
//! - `HasCurrentMessage`: a line that is not a header continues the
//!   current message
//!
//! A header line always flushes the current message and starts a new one.

use chrono::NaiveDateTime;

use super::grammar::{HeaderMatch, LineGrammar};
use super::normalize::{is_system_notice, normalize_line};
use super::timestamp::TimestampResolver;
use super::types::{FailedLine, Message, ParseQuality, ParsedTranscript, TimestampSource};

/// Default cap on recorded failing-line samples.
pub const DEFAULT_FAILED_LINE_SAMPLES: usize = 10;

/// Characters of a failing line kept in its sample.
pub const FAILED_LINE_PREVIEW_CHARS: usize = 100;

/// Parser knobs.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Instant used for unresolvable timestamps
    pub fallback_now: NaiveDateTime,
    /// Maximum failing-line samples to keep
    pub failed_line_samples: usize,
}

impl ParserOptions {
    pub fn new(fallback_now: NaiveDateTime) -> Self {
        Self {
            fallback_now,
            failed_line_samples: DEFAULT_FAILED_LINE_SAMPLES,
        }
    }

    /// Options using the current local wall clock as the fallback instant.
    pub fn now() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }
}

#[derive(Debug)]
enum State {
    NoCurrentMessage,
    HasCurrentMessage(Message),
}

/// Accumulator threaded through the fold over lines.
#[derive(Debug)]
struct Fold {
    state: State,
    messages: Vec<Message>,
    quality: ParseQuality,
}

/// Turns raw transcript text into ordered messages plus parse statistics.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    grammar: LineGrammar,
    resolver: TimestampResolver,
    failed_line_samples: usize,
}

impl TranscriptParser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            grammar: LineGrammar::new(),
            resolver: TimestampResolver::new(options.fallback_now),
            failed_line_samples: options.failed_line_samples,
        }
    }

    /// Parse a whole transcript.
    pub fn parse(&self, input: &str) -> ParsedTranscript {
        let initial = Fold {
            state: State::NoCurrentMessage,
            messages: Vec::new(),
            quality: ParseQuality::default(),
        };

        let mut fold = input
            .lines()
            .enumerate()
            .fold(initial, |acc, (index, raw)| self.step(acc, index + 1, raw));

        if let State::HasCurrentMessage(message) = fold.state {
            fold.messages.push(message);
        }

        tracing::debug!(
            parsed = fold.quality.parsed_count,
            errors = fold.quality.error_count,
            fallbacks = fold.quality.fallback_timestamps,
            "transcript parsed"
        );

        ParsedTranscript {
            messages: fold.messages,
            quality: fold.quality,
        }
    }

    fn step(&self, mut acc: Fold, line_index: usize, raw: &str) -> Fold {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let line = normalize_line(raw);
        if line.trim().is_empty() {
            return acc;
        }

        if let Some(header) = self.grammar.match_line(&line) {
            if let State::HasCurrentMessage(previous) = acc.state {
                acc.messages.push(previous);
            }
            let id = acc.messages.len();
            let message = self.start_message(id, header, raw);
            acc.quality.parsed_count += 1;
            if message.timestamp_source == TimestampSource::Fallback {
                acc.quality.fallback_timestamps += 1;
            }
            acc.state = State::HasCurrentMessage(message);
            return acc;
        }

        match acc.state {
            State::HasCurrentMessage(ref mut current) => {
                current.text.push('\n');
                current.text.push_str(&line);
                current.raw_line.push('\n');
                current.raw_line.push_str(raw);
            }
            State::NoCurrentMessage => {
                if !is_system_notice(raw) {
                    acc.quality.error_count += 1;
                    if acc.quality.failed_lines.len() < self.failed_line_samples {
                        acc.quality.failed_lines.push(FailedLine {
                            line_index,
                            preview: raw.chars().take(FAILED_LINE_PREVIEW_CHARS).collect(),
                        });
                    }
                }
            }
        }
        acc
    }

    fn start_message(&self, id: usize, header: HeaderMatch, raw: &str) -> Message {
        let resolved = self.resolver.resolve(&header.timestamp_text);
        Message {
            id,
            timestamp: resolved.at,
            timestamp_source: resolved.source,
            author: header.author,
            text: header.text,
            attachments: header.attachments,
            raw_line: raw.to_string(),
        }
    }
}
