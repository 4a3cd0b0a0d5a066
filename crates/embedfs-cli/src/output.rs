//! Delivery of generated source.

use embedfs_core::{Error, Result};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `content` to `path`, or to stdout when no path is given.
///
/// Files are written atomically: the content goes to a temporary file in
/// the destination directory, which is then renamed over `path`. A failed
/// write leaves neither a partial file nor the temporary behind. The
/// destination directory is not created.
///
/// # Errors
///
/// Returns [`Error::OutputUnwritable`] if the destination cannot be written.
///
/// # Examples
///
/// ```
/// use embedfs_cli::output::write_output;
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("assets.rs");
/// write_output(Some(&path), "pub mod embedded {}\n")?;
/// assert_eq!(std::fs::read_to_string(&path)?, "pub mod embedded {}\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => write_file_atomic(path, content),
        None => {
            let unwritable = |source| Error::OutputUnwritable {
                path: "<stdout>".to_string(),
                source,
            };
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes()).map_err(unwritable)?;
            stdout.flush().map_err(unwritable)
        }
    }
}

fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let unwritable = |source| Error::OutputUnwritable {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(unwritable)?;
    temp.write_all(content.as_bytes()).map_err(unwritable)?;
    temp.as_file().sync_all().map_err(unwritable)?;
    temp.persist(path).map_err(|e| unwritable(e.error))?;

    Ok(())
}
