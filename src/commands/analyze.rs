//! Analyze command handler

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use rayon::prelude::*;

use chatburst::export::write_batches;
use chatburst::pipeline::QualityFailureReport;
use chatburst::theme::{current_theme, Theme};
use chatburst::{AnalysisReport, Config, Pipeline, PipelineError};
use serde::Serialize;

use super::{display_name, duplicate_stem, file_stem, output_path};

/// Exit status for a transcript rejected by the quality gate.
pub const EXIT_QUALITY_GATE: i32 = 2;

/// Exit status for inputs that could not be loaded.
pub const EXIT_INPUT_ERROR: i32 = 1;

/// Options of the analyze command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub files: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub batch_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub timezone: Option<String>,
    pub max_gap: Option<i64>,
    pub min_burst: Option<usize>,
    pub min_success_rate: Option<f64>,
    pub summary: bool,
}

/// One printed result: a report, or the gate failure that replaced it.
#[derive(Serialize)]
#[serde(untagged)]
enum Document {
    Report(Box<AnalysisReport>),
    Rejected(QualityFailureReport),
}

impl AnalyzeArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.batch_size {
            config.export.batch_size = size;
        }
        if let Some(timezone) = &self.timezone {
            config.ingest.timezone = timezone.clone();
        }
        if let Some(minutes) = self.max_gap {
            config.segmentation.max_gap_minutes = minutes;
        }
        if let Some(min) = self.min_burst {
            config.segmentation.min_burst_messages = min;
        }
        if let Some(rate) = self.min_success_rate {
            config.quality.min_success_rate = rate;
        }
    }
}

/// Analyze every input and print results in input order.
///
/// Inputs run in parallel. A single input that cannot be loaded is returned
/// as an error; with several inputs, load errors are reported and the rest
/// still run. Export and write failures are reported per input. Inputs that
/// share a file stem are refused up front when writing to `--out-dir` or
/// `--batch-dir`. Exits with status 2 when any transcript fails the quality
/// gate.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: AnalyzeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid option: {}", e))?;
    check_output_names(&args)?;

    let pipeline = Pipeline::from_config(&config, chrono::Local::now().naive_local());
    let max_bytes = config.ingest.max_input_bytes;
    let outcomes: Vec<Result<AnalysisReport, PipelineError>> = args
        .files
        .par_iter()
        .map(|path| pipeline.run_path(path, max_bytes))
        .collect();

    let theme = current_theme();
    let several = args.files.len() > 1;
    let mut documents = Vec::new();
    let mut status = 0;

    for (path, outcome) in args.files.iter().zip(outcomes) {
        match outcome {
            Ok(report) => {
                if let Some(dir) = &args.batch_dir {
                    let target = if several {
                        dir.join(file_stem(path))
                    } else {
                        dir.clone()
                    };
                    match write_batches(&report, &target, config.export.batch_size) {
                        Ok(summary) => eprintln!(
                            "{}",
                            theme.secondary_text(&format!(
                                "Exported {} messages in {} batch file(s) to {}",
                                summary.messages_written,
                                summary.batch_files.len(),
                                target.display()
                            ))
                        ),
                        Err(err) => {
                            status = status.max(EXIT_INPUT_ERROR);
                            report_error(&theme, path, &err);
                            continue;
                        }
                    }
                }

                if let Some(dir) = &args.out_dir {
                    match write_report(dir, path, &report) {
                        Ok(written) => eprintln!(
                            "{}",
                            theme.success_text(&format!("Wrote {}", written.display()))
                        ),
                        Err(err) => {
                            status = status.max(EXIT_INPUT_ERROR);
                            report_error(&theme, path, &err);
                        }
                    }
                } else if args.summary {
                    println!("{}", summary_text(&display_name(path), &report, &theme));
                } else {
                    documents.push(Document::Report(Box::new(report)));
                }
            }
            Err(PipelineError::ParseQuality(failure)) => {
                status = EXIT_QUALITY_GATE;
                eprintln!(
                    "{}",
                    theme.error_text(&format!(
                        "{}: transcript rejected by the parse quality gate",
                        display_name(path)
                    ))
                );
                let rejected = Document::Rejected(failure.report());
                if args.out_dir.is_some() || args.summary {
                    print_json(&rejected)?;
                } else {
                    documents.push(rejected);
                }
            }
            Err(PipelineError::Input(err)) => {
                if !several {
                    return Err(err.into());
                }
                status = status.max(EXIT_INPUT_ERROR);
                report_error(&theme, path, &err);
            }
        }
    }

    match documents.len() {
        0 => {}
        1 if !several => print_json(&documents[0])?,
        _ => print_json(&documents)?,
    }

    if status != 0 {
        io::stdout().flush()?;
        std::process::exit(status);
    }
    Ok(())
}

/// Refuse several inputs whose outputs would land on the same file name.
fn check_output_names(args: &AnalyzeArgs) -> Result<()> {
    if args.out_dir.is_none() && args.batch_dir.is_none() {
        return Ok(());
    }
    if let Some((first, second)) = duplicate_stem(&args.files) {
        bail!(
            "Inputs {} and {} share the name '{}' and would overwrite each other's output. \
             Rename one or analyze them separately.",
            first.display(),
            second.display(),
            file_stem(first)
        );
    }
    Ok(())
}

fn report_error(theme: &Theme, path: &Path, err: &dyn std::fmt::Display) {
    eprintln!(
        "{}",
        theme.error_text(&format!("Error: {}: {}", display_name(path), err))
    );
}

/// Write `report` as `<dir>/<input stem>.json`.
pub fn write_report(dir: &Path, input: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;
    let path = output_path(dir, input, "json");
    let json = report.to_json_pretty().context("Failed to serialize report")?;
    fs::write(&path, json).with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(path)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

/// Human-readable report summary.
pub fn summary_text(name: &str, report: &AnalysisReport, theme: &Theme) -> String {
    let mut lines = vec![
        theme.accent_text(name),
        format!(
            "  Messages: {} (parse success {:.1}%)",
            report.total_messages,
            report.parse_success_rate * 100.0
        ),
    ];

    let fallbacks = report.quality.fallback_timestamps;
    if fallbacks > 0 {
        lines.push(theme.warning_text(&format!(
            "  Warning: {} message(s) had unreadable timestamps",
            fallbacks
        )));
    }

    lines.push(format!("  Events: {}", report.events_detected));
    for event in &report.events {
        let mut line = format!(
            "    [{}] {}  {} to {}  {} messages  confidence {:.2}",
            event.event_id,
            event.title,
            event.start_datetime.replace('T', " "),
            event.end_datetime.replace('T', " "),
            event.message_count,
            event.confidence_score
        );
        if !event.keywords.is_empty() {
            line.push_str(&format!("  ({})", event.keywords.join(", ")));
        }
        lines.push(theme.primary_text(&line));
    }

    lines.push(theme.secondary_text(&format!(
        "  Unassigned messages: {}",
        report.unassigned_count()
    )));
    lines.join("\n")
}
