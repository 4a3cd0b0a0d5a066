//! CLI command implementations.
//!
//! Each subcommand has its own module with a `run` function returning an
//! [`ExitCode`](embedfs_core::cli::ExitCode).

pub mod completions;
pub mod generate;
pub mod list;

use anyhow::{Context, Result};
use embedfs_core::GeneratorConfig;
use embedfs_vfs::{PathMatcher, Vfs};
use std::path::PathBuf;
use tracing::debug;

/// Compiles the configured patterns and aggregates every input.
///
/// Patterns are compiled before any source is opened, so a bad pattern
/// fails without touching the filesystem.
pub(crate) fn load_selection(
    config: &GeneratorConfig,
    inputs: &[PathBuf],
) -> Result<(Vfs, PathMatcher)> {
    let matcher = PathMatcher::new(config.include.as_deref(), config.exclude.as_deref())?;

    let mut vfs = Vfs::new();
    vfs.add_sources(config.recursive, inputs)
        .context("failed to aggregate inputs")?;
    debug!(
        sources = inputs.len(),
        entries = vfs.len(),
        "aggregated inputs"
    );

    Ok((vfs, matcher))
}
