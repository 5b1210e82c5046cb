//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use chatburst::theme::current_theme;
use chatburst::Config;

/// Config file location: `--config` when given, otherwise the default path.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Print the config file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(explicit)?.display());
    Ok(())
}

/// Write a config file with default values.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_path(explicit)?;
    init_at(&path, force)?;
    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!("Wrote default config to {}", path.display()))
    );
    Ok(())
}

/// Write defaults to `path`, refusing to overwrite unless `force` is set.
pub fn init_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }
    Config::default().save_to(path)
}
