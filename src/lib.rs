//! chatburst library
//!
//! Parses exported chat transcripts into messages and detects conversational
//! events: bursts of dense activity, titled and tagged from a keyword
//! taxonomy.
//!
//! ```
//! use chatburst::{Pipeline, PipelineOptions};
//!
//! let now = chrono::Local::now().naive_local();
//! let pipeline = Pipeline::new(PipelineOptions::new(now));
//! let report = pipeline.run("[15/01/2024, 10:00:00] Alice: hi").unwrap();
//! assert_eq!(report.total_messages, 1);
//! assert_eq!(report.events_detected, 0);
//! ```

pub mod config;
pub mod events;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod preview;
pub mod theme;
pub mod transcript;

pub use config::Config;
pub use events::{Burst, Category, Event};
pub use ingest::{load_transcript, InputError, Transcript};
pub use pipeline::{AnalysisReport, Pipeline, PipelineError, PipelineOptions};
pub use transcript::{Message, ParseQuality, ParsedTranscript, TranscriptParser};
