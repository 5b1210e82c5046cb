//! Preview command handler

use std::path::Path;

use anyhow::Result;

use chatburst::load_transcript;
use chatburst::preview::{month_buckets, MonthBucket};
use chatburst::theme::{current_theme, Theme};
use chatburst::Config;

/// Print per-month line counts for a transcript.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, json: bool, config: &Config) -> Result<()> {
    let transcript = load_transcript(file, config.ingest.max_input_bytes)?;
    let buckets = month_buckets(&transcript.text);

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else {
        println!("{}", buckets_table(&buckets, &current_theme()));
    }
    Ok(())
}

/// Render buckets as an aligned two-column table.
pub fn buckets_table(buckets: &[MonthBucket], theme: &Theme) -> String {
    if buckets.is_empty() {
        return theme.secondary_text("No dated lines found.");
    }

    let width = buckets.iter().map(|b| b.label.len()).max().unwrap_or(0);
    let total: usize = buckets.iter().map(|b| b.count).sum();
    let mut lines: Vec<String> = buckets
        .iter()
        .map(|b| format!("{:<width$}  {:>6}", b.label, b.count, width = width))
        .map(|line| theme.primary_text(&line))
        .collect();
    lines.push(theme.accent_text(&format!(
        "{:<width$}  {:>6}",
        "Total",
        total,
        width = width
    )));
    lines.join("\n")
}
