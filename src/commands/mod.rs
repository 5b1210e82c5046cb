//! Command handlers for the chatburst CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod analyze;
pub mod completions;
pub mod config;
pub mod parse;
pub mod preview;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use chatburst::Config;

/// Load config from `--config` when given, otherwise from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Display name for an input path (its file name, or the whole path).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// File stem of an input path, `transcript` when it has none.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "transcript".to_string())
}

/// First pair of inputs that share a file stem, and would therefore write
/// to the same output name.
pub fn duplicate_stem(inputs: &[PathBuf]) -> Option<(&Path, &Path)> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for input in inputs {
        if let Some(first) = seen.insert(file_stem(input), input) {
            return Some((first, input));
        }
    }
    None
}

/// Output path `<dir>/<input stem>.<ext>`.
pub fn output_path(dir: &Path, input: &Path, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(input), ext))
}
