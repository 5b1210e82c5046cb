//! Configuration management for chatburst
//!
//! Settings live in `~/.config/chatburst/config.toml`. Every field has a
//! default, so the file only needs the values a user wants to override.
//! CLI flags take priority over config, which overrides defaults.

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use chrono::Duration;
use std::path::{Path, PathBuf};

use crate::events::BurstSegmenter;

impl Config {
    /// Get the config file path (~/.config/chatburst/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/chatburst)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit path, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Maximum gap between messages of one burst
    pub fn max_gap(&self) -> Duration {
        Duration::minutes(self.segmentation.max_gap_minutes)
    }

    /// Burst segmenter configured from `[segmentation]`
    pub fn burst_segmenter(&self) -> BurstSegmenter {
        BurstSegmenter::new(self.max_gap(), self.segmentation.min_burst_messages)
    }
}
