//! CLI definitions for chatburst
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be shared with the completions generator and tests.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles using our theme colors.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "chatburst")]
#[command(about = "Parse exported chat transcripts and detect conversational events")]
#[command(
    long_about = "chatburst - turn an exported chat log into messages and events.

Each transcript is parsed line by line into messages (bracketed, dashed and
ISO header dialects are recognized, multi-line messages are reassembled).
Messages are then grouped into bursts of dense activity, and every burst is
titled and tagged as an event (Meeting, Birthday, Travel, ...).

QUICK START:
    chatburst analyze chat.txt               Print messages and events as JSON
    chatburst analyze chat.zip --summary     Human-readable summary
    chatburst preview chat.txt               Messages per month
    chatburst config show                    Show effective configuration

EXIT STATUS:
    0  success
    1  error (missing file, input too large, invalid config, ...)
    2  transcript rejected by the parse quality gate"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of ~/.config/chatburst/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect events in one or more transcripts
    #[command(long_about = "Parse transcripts, detect events and print the result.

Accepts plain .txt exports and .zip archives (the first .txt entry is used).
With several inputs, files are analyzed in parallel and printed in the order
given. A transcript whose header lines mostly fail to parse is rejected: the
failure record is printed as JSON and the exit status is 2.

EXAMPLES:
    chatburst analyze chat.txt
    chatburst analyze a.txt b.zip --out-dir results/
    chatburst analyze chat.txt --batch-dir export/ --batch-size 1000
    chatburst analyze chat.txt --max-gap 30 --min-burst 3")]
    Analyze {
        /// Transcript files (.txt or .zip)
        #[arg(required = true, help = "Transcript files (.txt or .zip)")]
        files: Vec<PathBuf>,
        /// Write one <name>.json per input into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Write batched messages-NNNN.jsonl files plus events.json here
        #[arg(long, value_name = "DIR")]
        batch_dir: Option<PathBuf>,
        /// Records per batch file (overrides config)
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,
        /// Timezone label attached to the output (overrides config)
        #[arg(long, value_name = "TZ")]
        timezone: Option<String>,
        /// Largest gap in minutes between messages of one burst (overrides config)
        #[arg(long, value_name = "MINUTES")]
        max_gap: Option<i64>,
        /// Smallest burst that becomes an event (overrides config)
        #[arg(long, value_name = "N")]
        min_burst: Option<usize>,
        /// Reject transcripts below this parse success rate (overrides config)
        #[arg(long, value_name = "RATE")]
        min_success_rate: Option<f64>,
        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Parse a transcript and print messages without detecting events
    #[command(long_about = "Parse a transcript and print its messages as JSON lines.

Parse statistics (success rate, failing lines) are printed to stderr.
The quality gate is not applied.

EXAMPLE:
    chatburst parse chat.txt")]
    Parse {
        /// Transcript file (.txt or .zip)
        #[arg(help = "Transcript file (.txt or .zip)")]
        file: PathBuf,
    },

    /// Count messages per month
    #[command(long_about = "Count dated lines per calendar month.

A fast look at an export before analyzing it. Slash, dotted and ISO
leading dates are recognized.

EXAMPLES:
    chatburst preview chat.txt
    chatburst preview chat.txt --json")]
    Preview {
        /// Transcript file (.txt or .zip)
        #[arg(help = "Transcript file (.txt or .zip)")]
        file: PathBuf,
        /// Print buckets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

EXAMPLES:
    chatburst completions --shell bash > ~/.local/share/bash-completion/completions/chatburst
    chatburst completions --shell zsh > ~/.zfunc/_chatburst")]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
