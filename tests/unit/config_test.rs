//! Unit tests for config module

use chatburst::Config;
use chrono::Duration;

#[test]
fn default_config_matches_documented_values() {
    let config = Config::default();
    assert_eq!(config.ingest.max_input_bytes, 1_073_741_824);
    assert_eq!(config.ingest.timezone, "UTC");
    assert_eq!(config.segmentation.max_gap_minutes, 10);
    assert_eq!(config.segmentation.min_burst_messages, 5);
    assert_eq!(config.quality.min_success_rate, 0.85);
    assert_eq!(config.quality.sample_lines, 20);
    assert_eq!(config.quality.failed_line_samples, 10);
    assert_eq!(config.export.batch_size, 500);
}

#[test]
fn empty_file_parses_to_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.segmentation.min_burst_messages, 5);
    assert_eq!(config.ingest.timezone, "UTC");
}

#[test]
fn sections_parse_from_toml() {
    let toml_str = r#"
[ingest]
timezone = "Asia/Kolkata"

[quality]
min_success_rate = 0.9

[export]
batch_size = 1000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.ingest.timezone, "Asia/Kolkata");
    assert_eq!(config.ingest.max_input_bytes, 1_073_741_824);
    assert_eq!(config.quality.min_success_rate, 0.9);
    assert_eq!(config.quality.sample_lines, 20);
    assert_eq!(config.export.batch_size, 1000);
    assert!(config.validate().is_ok());
}

#[test]
fn segmenter_follows_config() {
    let mut config = Config::default();
    config.segmentation.max_gap_minutes = 60;
    assert_eq!(config.max_gap(), Duration::hours(1));
}

#[test]
fn negative_rate_is_invalid() {
    let mut config = Config::default();
    config.quality.min_success_rate = -0.1;
    assert!(config.validate().is_err());
}
