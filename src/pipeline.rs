//! End-to-end analysis of one transcript.
//!
//! [`Pipeline`] wires the transcript parser and the event stages together,
//! enforces the parse quality gate, and produces an [`AnalysisReport`].

mod error;
mod report;
mod service;

pub use error::{PipelineError, QualityFailure, QualityFailureReport};
pub use report::{AnalysisReport, EventRecord, MessageRecord, DATETIME_FORMAT};
pub use service::{Pipeline, PipelineOptions};
