//! `embedfs list`: show what a generation run would select.

use anyhow::Result;
use embedfs_core::GeneratorConfig;
use embedfs_core::cli::{ExitCode, OutputFormat};
use std::io::{self, Write};
use tracing::info;

use super::load_selection;
use crate::cli::ListArgs;
use crate::formatters::{ListingEntry, format_listing};

/// Collects the listing for `args` under `config`.
///
/// # Errors
///
/// Returns an error if a pattern is invalid or an input cannot be read.
pub fn collect(config: &GeneratorConfig, args: &ListArgs) -> Result<Vec<ListingEntry>> {
    let (vfs, matcher) = load_selection(config, &args.selection.inputs)?;
    Ok(vfs
        .matching_entries(&matcher, args.dirs_only)
        .map(ListingEntry::from)
        .collect())
}

/// Runs the list command, printing the listing to stdout.
///
/// # Errors
///
/// Returns an error if the listing cannot be collected or printed.
pub fn run(config: &GeneratorConfig, args: &ListArgs, format: OutputFormat) -> Result<ExitCode> {
    let entries = collect(config, args)?;
    info!(count = entries.len(), "listed paths");

    let output = format_listing(&entries, format)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
