//! Completions command handler

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};

/// Write a completion script for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: CompletionShell) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate_completions::<C, _>(shell, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Generate a completion script into `writer`.
pub(crate) fn generate_completions<C: CommandFactory, W: Write>(
    shell: CompletionShell,
    writer: &mut W,
) -> Result<()> {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "chatburst", writer);
    Ok(())
}
