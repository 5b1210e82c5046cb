//! chatburst - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands, ConfigCommands};
use commands::analyze::AnalyzeArgs;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set and no `-v` was given; otherwise the level
/// follows the verbosity count (default warn).
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze {
            files,
            out_dir,
            batch_dir,
            batch_size,
            timezone,
            max_gap,
            min_burst,
            min_success_rate,
            summary,
        } => {
            let args = AnalyzeArgs {
                files,
                out_dir,
                batch_dir,
                batch_size,
                timezone,
                max_gap,
                min_burst,
                min_success_rate,
                summary,
            };
            commands::analyze::handle(args, commands::load_config(config_path)?)
        }
        Commands::Parse { file } => {
            commands::parse::handle(&file, &commands::load_config(config_path)?)
        }
        Commands::Preview { file, json } => {
            commands::preview::handle(&file, json, &commands::load_config(config_path)?)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => {
                commands::config::handle_show(&commands::load_config(config_path)?)
            }
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
