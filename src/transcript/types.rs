//! Data structures produced by the transcript parser.

use chrono::NaiveDateTime;

/// Where a message timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// Resolved from the header text.
    Parsed,
    /// Header text was unresolvable; the run's wall-clock instant was used.
    Fallback,
}

/// One chat message, possibly reassembled from several physical lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Position in file order (0-based)
    pub id: usize,
    pub timestamp: NaiveDateTime,
    pub timestamp_source: TimestampSource,
    pub author: String,
    /// Message body. Continuation lines are joined with `\n`.
    /// Attachment markers stay in the text.
    pub text: String,
    /// File names referenced by `<attached: ...>` markers
    pub attachments: Vec<String>,
    /// Original physical line(s), newline-joined
    pub raw_line: String,
}

impl Message {
    pub fn has_fallback_timestamp(&self) -> bool {
        self.timestamp_source == TimestampSource::Fallback
    }
}

/// A line that neither matched a header nor continued a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLine {
    /// 1-based line number in the input
    pub line_index: usize,
    /// First 100 characters of the raw line
    pub preview: String,
}

impl FailedLine {
    /// Render as `"{line_index}: {preview}"`.
    pub fn render(&self) -> String {
        format!("{}: {}", self.line_index, self.preview)
    }
}

/// Parse statistics for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseQuality {
    /// Lines that matched a header grammar
    pub parsed_count: usize,
    /// Lines that matched nothing and had no message to continue
    pub error_count: usize,
    /// Messages whose timestamp hit the wall-clock fallback
    pub fallback_timestamps: usize,
    /// Up to the configured number of failing-line samples
    pub failed_lines: Vec<FailedLine>,
}

impl ParseQuality {
    /// Lines that were attempted as message starts.
    pub fn attempted(&self) -> usize {
        self.parsed_count + self.error_count
    }

    /// `parsed / (parsed + errors)`. An input with nothing to attempt counts
    /// as fully successful.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            return 1.0;
        }
        self.parsed_count as f64 / attempted as f64
    }
}

/// Output of [`TranscriptParser::parse`](super::TranscriptParser::parse).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTranscript {
    pub messages: Vec<Message>,
    pub quality: ParseQuality,
}
