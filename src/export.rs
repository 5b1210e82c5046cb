//! Batched export of analysis results.
//!
//! Message records are written as JSON lines split across numbered files of
//! at most `batch_size` records each (`messages-0001.jsonl`, ...). Events go
//! to a single `events.json`. A downstream loader can ingest one batch file
//! per transaction.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::pipeline::{AnalysisReport, MessageRecord};

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Name of the events file inside an export directory.
pub const EVENTS_FILE: &str = "events.json";

/// Iterator over consecutive message chunks.
pub struct MessageBatches<'a> {
    chunks: std::slice::Chunks<'a, MessageRecord>,
}

impl<'a> MessageBatches<'a> {
    /// Split `messages` into chunks of `batch_size`.
    ///
    /// A `batch_size` of zero is treated as one.
    pub fn new(messages: &'a [MessageRecord], batch_size: usize) -> Self {
        Self {
            chunks: messages.chunks(batch_size.max(1)),
        }
    }
}

impl<'a> Iterator for MessageBatches<'a> {
    type Item = &'a [MessageRecord];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

/// What `write_batches` produced.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Batch files in write order
    pub batch_files: Vec<PathBuf>,
    pub events_file: PathBuf,
    pub messages_written: usize,
    pub events_written: usize,
    /// Total bytes across all files
    pub bytes_written: u64,
}

/// File name of the `index`th batch (0-based).
pub fn batch_file_name(index: usize) -> String {
    format!("messages-{:04}.jsonl", index + 1)
}

/// Write one batch as JSON lines.
pub fn write_batch<W: Write>(writer: &mut W, batch: &[MessageRecord]) -> Result<()> {
    for record in batch {
        let json = serde_json::to_string(record).context("Failed to serialize message")?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

/// Whether `name` is a batch file name (`messages-*.jsonl`).
pub fn is_batch_file_name(name: &str) -> bool {
    name.starts_with("messages-") && name.ends_with(".jsonl")
}

/// Delete batch files left in `dir` by an earlier export.
///
/// Returns how many files were removed. Other files are left alone.
pub fn remove_stale_batches(dir: &Path) -> Result<usize> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory: {:?}", dir))?;
        let path = entry.path();
        let is_batch = entry.file_name().to_str().is_some_and(is_batch_file_name);
        if is_batch && path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", path))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write `report` into `dir` as batch files plus `events.json`.
///
/// The directory is created if needed. Batch files from an earlier export
/// into the same directory are removed first, so the directory only ever
/// holds the current report's batches.
pub fn write_batches(
    report: &AnalysisReport,
    dir: &Path,
    batch_size: usize,
) -> Result<ExportSummary> {
    if batch_size == 0 {
        bail!("Batch size must be at least 1");
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;
    let stale = remove_stale_batches(dir)?;
    if stale > 0 {
        tracing::debug!(dir = %dir.display(), stale, "removed old batch files");
    }

    let mut summary = ExportSummary::default();
    for (index, batch) in MessageBatches::new(&report.messages, batch_size).enumerate() {
        let path = dir.join(batch_file_name(index));
        let file =
            fs::File::create(&path).with_context(|| format!("Failed to create file: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        write_batch(&mut writer, batch)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write file: {:?}", path))?;

        summary.bytes_written += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        summary.messages_written += batch.len();
        summary.batch_files.push(path);
    }

    let events_path = dir.join(EVENTS_FILE);
    let events_json =
        serde_json::to_string_pretty(&report.events).context("Failed to serialize events")?;
    fs::write(&events_path, &events_json)
        .with_context(|| format!("Failed to write file: {:?}", events_path))?;
    summary.bytes_written += events_json.len() as u64;
    summary.events_written = report.events.len();
    summary.events_file = events_path;

    tracing::debug!(
        dir = %dir.display(),
        batches = summary.batch_files.len(),
        messages = summary.messages_written,
        "exported batches"
    );
    Ok(summary)
}
