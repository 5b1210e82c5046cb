//! Pipeline service facade.
//!
//! `Pipeline` runs every engine stage over one transcript:
//!
//! 1. Parse lines into messages (normalize, match headers, resolve timestamps)
//! 2. Enforce the parse quality gate
//! 3. Segment messages into bursts
//! 4. Classify each burst into an event
//! 5. Assign messages to events
//! 6. Build the output report
//!
//! Stages 3-6 never run when the gate trips.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::config::{default_min_success_rate, default_sample_lines, default_timezone, Config};
use crate::events::{assign_messages, BurstSegmenter, EventClassifier};
use crate::ingest::load_transcript;
use crate::transcript::{ParserOptions, TranscriptParser, DEFAULT_FAILED_LINE_SAMPLES};

use super::error::{PipelineError, QualityFailure};
use super::report::AnalysisReport;

/// Configuration options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Instant substituted for unresolvable timestamps
    pub fallback_now: NaiveDateTime,
    /// Failing-line samples kept by the parser
    pub failed_line_samples: usize,
    /// Burst segmentation parameters
    pub segmenter: BurstSegmenter,
    /// Success rate below which the run is rejected
    pub min_success_rate: f64,
    /// Raw lines echoed back on rejection
    pub sample_lines: usize,
    /// Timezone label carried into the report
    pub timezone: String,
}

impl PipelineOptions {
    /// Default options with an explicit fallback instant.
    pub fn new(fallback_now: NaiveDateTime) -> Self {
        Self {
            fallback_now,
            failed_line_samples: DEFAULT_FAILED_LINE_SAMPLES,
            segmenter: BurstSegmenter::default(),
            min_success_rate: default_min_success_rate(),
            sample_lines: default_sample_lines(),
            timezone: default_timezone(),
        }
    }

    /// Options derived from a loaded config.
    pub fn from_config(config: &Config, fallback_now: NaiveDateTime) -> Self {
        Self {
            fallback_now,
            failed_line_samples: config.quality.failed_line_samples,
            segmenter: config.burst_segmenter(),
            min_success_rate: config.quality.min_success_rate,
            sample_lines: config.quality.sample_lines,
            timezone: config.ingest.timezone.clone(),
        }
    }

    /// Set the segmenter.
    pub fn segmenter(mut self, segmenter: BurstSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Set the quality threshold.
    pub fn min_success_rate(mut self, rate: f64) -> Self {
        self.min_success_rate = rate;
        self
    }

    /// Set the timezone label.
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }
}

/// Runs the engine end to end.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    parser: TranscriptParser,
    classifier: EventClassifier,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        let parser = TranscriptParser::new(ParserOptions {
            fallback_now: options.fallback_now,
            failed_line_samples: options.failed_line_samples,
        });
        Self {
            options,
            parser,
            classifier: EventClassifier::new(),
        }
    }

    /// Pipeline configured from `config`.
    pub fn from_config(config: &Config, fallback_now: NaiveDateTime) -> Self {
        Self::new(PipelineOptions::from_config(config, fallback_now))
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every stage over `input`.
    pub fn run(&self, input: &str) -> Result<AnalysisReport, PipelineError> {
        let parsed = self.parser.parse(input);
        let quality = parsed.quality;

        let rate = quality.success_rate();
        if quality.attempted() > 0 && rate < self.options.min_success_rate {
            tracing::warn!(
                rate,
                threshold = self.options.min_success_rate,
                "parse quality below threshold"
            );
            return Err(PipelineError::ParseQuality(Box::new(QualityFailure {
                parse_success_rate: rate,
                threshold: self.options.min_success_rate,
                parsed_count: quality.parsed_count,
                error_count: quality.error_count,
                sample: input
                    .lines()
                    .take(self.options.sample_lines)
                    .map(String::from)
                    .collect(),
                failed_lines: quality.failed_lines,
            })));
        }

        let messages = parsed.messages;
        let bursts = self.options.segmenter.segment(&messages);
        let events = self.classifier.classify_all(&messages, &bursts);
        let assignments = assign_messages(&messages, &events);
        tracing::debug!(
            bursts = bursts.len(),
            events = events.len(),
            "segmented transcript"
        );

        Ok(AnalysisReport::build(
            &messages,
            &events,
            &assignments,
            quality,
            &self.options.timezone,
        ))
    }

    /// Load a transcript from disk and run it.
    pub fn run_path(&self, path: &Path, max_bytes: u64) -> Result<AnalysisReport, PipelineError> {
        let transcript = load_transcript(path, max_bytes)?;
        self.run(&transcript.text)
    }
}
