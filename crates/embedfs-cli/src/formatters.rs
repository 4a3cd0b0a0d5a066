//! Output formatters for listings.
//!
//! All three formats carry the same fields: JSON for machines, tab-separated
//! text for scripts, colored lines for people.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use embedfs_core::cli::OutputFormat;
use embedfs_memfs::ModTime;
use embedfs_vfs::Entry;
use serde::Serialize;

/// One listed path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingEntry {
    /// Normalized path
    pub path: String,
    /// `true` for directories
    pub is_dir: bool,
    /// Size in bytes; 0 for directories
    pub size: u64,
    /// Modification time as RFC 3339, absent when unknown
    pub modified: Option<String>,
}

impl From<&Entry> for ListingEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            path: entry.path().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            modified: rfc3339(entry.mod_time()),
        }
    }
}

/// Formats a listing according to `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use embedfs_cli::formatters::{ListingEntry, format_listing};
/// use embedfs_core::cli::OutputFormat;
///
/// let entries = [ListingEntry {
///     path: "a.txt".to_string(),
///     is_dir: false,
///     size: 2,
///     modified: None,
/// }];
///
/// let output = format_listing(&entries, OutputFormat::Text)?;
/// assert_eq!(output, "a.txt\tfile\t2\t-\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_listing(entries: &[ListingEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(entries),
        OutputFormat::Text => Ok(text::format(entries)),
        OutputFormat::Pretty => Ok(pretty::format(entries)),
    }
}

fn rfc3339(mod_time: ModTime) -> Option<String> {
    if mod_time.is_zero() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(mod_time.secs(), mod_time.nanos())
        .map(|time| time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize + ?Sized>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json + "\n")
    }
}

/// Plain text output formatting.
pub mod text {
    use super::ListingEntry;
    use std::fmt::Write;

    /// One tab-separated line per entry: path, kind, size, modification time.
    #[must_use]
    pub fn format(entries: &[ListingEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            let kind = if entry.is_dir { "dir" } else { "file" };
            let modified = entry.modified.as_deref().unwrap_or("-");
            let _ = writeln!(out, "{}\t{kind}\t{}\t{modified}", entry.path, entry.size);
        }
        out
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, ListingEntry};
    use std::fmt::Write;

    /// One line per entry: `path - N bytes - on TIME`, with directories
    /// written as `*path/ (dir)`.
    #[must_use]
    pub fn format(entries: &[ListingEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            let path = if entry.is_dir {
                format!("*{}/ (dir)", entry.path).blue().bold()
            } else {
                entry.path.green()
            };
            let modified = entry.modified.as_deref().unwrap_or("unknown time");
            let _ = writeln!(
                out,
                "{path} - {} bytes - on {}",
                entry.size.to_string().cyan(),
                modified.dimmed()
            );
        }
        out
    }
}
