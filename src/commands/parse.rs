//! Parse command handler

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use chatburst::load_transcript;
use chatburst::pipeline::MessageRecord;
use chatburst::theme::{current_theme, Theme};
use chatburst::transcript::{ParserOptions, TranscriptParser};
use chatburst::{Config, ParseQuality, ParsedTranscript};

/// Print the messages of one transcript as JSON lines.
///
/// Statistics go to stderr so stdout stays machine-readable.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config: &Config) -> Result<()> {
    let transcript = load_transcript(file, config.ingest.max_input_bytes)?;
    let parser = TranscriptParser::new(ParserOptions {
        fallback_now: chrono::Local::now().naive_local(),
        failed_line_samples: config.quality.failed_line_samples,
    });
    let parsed = parser.parse(&transcript.text);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_messages(&mut out, &parsed)?;
    out.flush()?;

    eprintln!("{}", stats_text(&parsed.quality, &current_theme()));
    Ok(())
}

/// Write each message as one JSON line. No events are linked.
pub fn write_messages<W: Write>(writer: &mut W, parsed: &ParsedTranscript) -> Result<()> {
    for message in &parsed.messages {
        let record = MessageRecord::new(message, None);
        let json = serde_json::to_string(&record).context("Failed to serialize message")?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

/// Human-readable parse statistics.
pub fn stats_text(quality: &ParseQuality, theme: &Theme) -> String {
    let mut lines = vec![theme.primary_text(&format!(
        "Parsed {} header line(s), {} unmatched, success rate {:.1}%",
        quality.parsed_count,
        quality.error_count,
        quality.success_rate() * 100.0
    ))];
    if quality.fallback_timestamps > 0 {
        lines.push(theme.warning_text(&format!(
            "{} message(s) had unreadable timestamps",
            quality.fallback_timestamps
        )));
    }
    for failed in &quality.failed_lines {
        lines.push(theme.secondary_text(&format!("  line {}", failed.render())));
    }
    lines.join("\n")
}
