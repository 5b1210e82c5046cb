//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Input loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Largest accepted transcript (raw or unpacked) in bytes
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
    /// Timezone label attached to results. Never applied to timestamps.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

pub fn default_max_input_bytes() -> u64 {
    1024 * 1024 * 1024
}

pub fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            timezone: default_timezone(),
        }
    }
}

/// Burst segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Largest gap between consecutive messages of one burst
    #[serde(default = "default_max_gap_minutes")]
    pub max_gap_minutes: i64,
    /// Smallest burst that becomes an event
    #[serde(default = "default_min_burst_messages")]
    pub min_burst_messages: usize,
}

pub fn default_max_gap_minutes() -> i64 {
    10
}

pub fn default_min_burst_messages() -> usize {
    5
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_gap_minutes: default_max_gap_minutes(),
            min_burst_messages: default_min_burst_messages(),
        }
    }
}

/// Parse quality gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Runs below this success rate are rejected
    #[serde(default = "default_min_success_rate")]
    pub min_success_rate: f64,
    /// Raw lines echoed back when the gate trips
    #[serde(default = "default_sample_lines")]
    pub sample_lines: usize,
    /// Failing-line samples kept during parsing
    #[serde(default = "default_failed_line_samples")]
    pub failed_line_samples: usize,
}

pub fn default_min_success_rate() -> f64 {
    0.85
}

pub fn default_sample_lines() -> usize {
    20
}

pub fn default_failed_line_samples() -> usize {
    10
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_success_rate: default_min_success_rate(),
            sample_lines: default_sample_lines(),
            failed_line_samples: default_failed_line_samples(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Message records per batch file
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

pub fn default_batch_size() -> usize {
    crate::export::DEFAULT_BATCH_SIZE
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.ingest.max_input_bytes == 0 {
            return Err("ingest.max_input_bytes must be > 0".to_string());
        }
        if self.ingest.timezone.trim().is_empty() {
            return Err("ingest.timezone must not be empty".to_string());
        }
        if self.segmentation.max_gap_minutes < 0 {
            return Err(format!(
                "segmentation.max_gap_minutes {} must not be negative",
                self.segmentation.max_gap_minutes
            ));
        }
        // Keep the gap within chrono's minute range
        if self.segmentation.max_gap_minutes > 60 * 24 * 365 {
            return Err(format!(
                "segmentation.max_gap_minutes {} exceeds maximum (one year)",
                self.segmentation.max_gap_minutes
            ));
        }
        if self.segmentation.min_burst_messages == 0 {
            return Err("segmentation.min_burst_messages must be > 0".to_string());
        }
        let rate = self.quality.min_success_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(format!(
                "quality.min_success_rate {} must be between 0.0 and 1.0",
                rate
            ));
        }
        if self.export.batch_size == 0 {
            return Err("export.batch_size must be > 0".to_string());
        }
        Ok(())
    }
}
