//! Pipeline errors.
//!
//! The engine stages never fail on their own; grammar and timestamp misses
//! degrade silently. The only error the pipeline raises is the quality gate,
//! which rejects a transcript whose header lines mostly failed to parse.
//! Input problems (missing or oversized files) surface from loading, before
//! the engine runs.

use serde::Serialize;

use crate::ingest::InputError;
use crate::transcript::FailedLine;

/// Diagnostics returned when the quality gate trips.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityFailure {
    /// Achieved `parsed / (parsed + errors)`
    pub parse_success_rate: f64,
    /// Rate the run had to reach
    pub threshold: f64,
    pub parsed_count: usize,
    pub error_count: usize,
    /// First raw lines of the input
    pub sample: Vec<String>,
    /// Failing-line samples from the parser
    pub failed_lines: Vec<FailedLine>,
}

impl QualityFailure {
    /// The serializable failure record.
    pub fn report(&self) -> QualityFailureReport {
        QualityFailureReport {
            error: format!(
                "Parse success rate {:.1}% is below the required {:.1}%. \
                 Re-export the chat in a supported format or locale and try again.",
                self.parse_success_rate * 100.0,
                self.threshold * 100.0
            ),
            parse_success_rate: self.parse_success_rate,
            sample: self.sample.clone(),
            failed_lines: self.failed_lines.iter().map(FailedLine::render).collect(),
        }
    }
}

/// Quality-gate failure in its emitted JSON shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityFailureReport {
    pub error: String,
    pub parse_success_rate: f64,
    pub sample: Vec<String>,
    pub failed_lines: Vec<String>,
}

/// Error type for pipeline runs.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Transcript could not be loaded; the engine was not invoked.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Too few lines parsed; segmentation never ran.
    #[error(
        "Parse success rate {:.1}% is below the required {:.1}% ({} parsed, {} failed)",
        .0.parse_success_rate * 100.0,
        .0.threshold * 100.0,
        .0.parsed_count,
        .0.error_count
    )]
    ParseQuality(Box<QualityFailure>),
}

impl PipelineError {
    /// Check if this error is the quality gate.
    pub fn is_quality_failure(&self) -> bool {
        matches!(self, PipelineError::ParseQuality(_))
    }

    /// Gate diagnostics, if this is a quality failure.
    pub fn quality_failure(&self) -> Option<&QualityFailure> {
        match self {
            PipelineError::ParseQuality(failure) => Some(&**failure),
            PipelineError::Input(_) => None,
        }
    }
}
