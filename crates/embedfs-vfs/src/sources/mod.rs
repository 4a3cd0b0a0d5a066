//! Input sources.
//!
//! A [`Source`] turns one host path into entries of the aggregated tree and
//! later hands out the bytes of the files it listed. Host files and
//! directories are read directly; zip, jar, and tar archives are read as
//! virtual directory trees.

mod host;
mod tar_archive;
mod zip_archive;

pub use host::{DirectorySource, FileSource};
pub use tar_archive::TarSource;
pub use zip_archive::ZipSource;

use crate::entry::{Entry, SourceId};
use crate::path::EntryPath;
use embedfs_core::{Error, Result};
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// A mounted input.
pub trait Source: fmt::Debug {
    /// Host path the source reads from.
    fn origin(&self) -> &Path;

    /// Lists every entry of the source, tagged with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if the source cannot be opened
    /// or listed.
    fn scan(&self, id: SourceId) -> Result<Vec<Entry>>;

    /// Opens the content of a file entry this source listed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if the bytes cannot be read and
    /// [`Error::InvalidArgument`] if the entry does not belong to the source.
    fn open(&self, entry: &Entry) -> Result<Box<dyn Read>>;
}

/// Archive formats read as directory trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip` and `.jar`
    Zip,
    /// `.tar`
    Tar,
}

impl ArchiveFormat {
    /// Detects the format from the file extension, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_vfs::sources::ArchiveFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ArchiveFormat::detect(Path::new("lib/App.JAR")), Some(ArchiveFormat::Zip));
    /// assert_eq!(ArchiveFormat::detect(Path::new("data.tar")), Some(ArchiveFormat::Tar));
    /// assert_eq!(ArchiveFormat::detect(Path::new("data.tar.gz")), None);
    /// ```
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "zip" | "jar" => Some(Self::Zip),
            "tar" => Some(Self::Tar),
            _ => None,
        }
    }

    /// Creates a source reading `archive`, with members placed below `mount`.
    #[must_use]
    pub fn source(self, archive: PathBuf, mount: Option<EntryPath>) -> Box<dyn Source> {
        match self {
            Self::Zip => Box::new(ZipSource::new(archive, mount)),
            Self::Tar => Box::new(TarSource::new(archive, mount)),
        }
    }
}

/// Picks the source type for a host path.
///
/// # Errors
///
/// Returns [`Error::SourceUnreadable`] if the path does not exist or its
/// metadata cannot be read.
pub fn open_source(path: &Path) -> Result<Box<dyn Source>> {
    let metadata = std::fs::metadata(path).map_err(|e| unreadable(path, e))?;
    if metadata.is_dir() {
        return Ok(Box::new(DirectorySource::new(path)));
    }
    Ok(match ArchiveFormat::detect(path) {
        Some(format) => format.source(path.to_path_buf(), None),
        None => Box::new(FileSource::new(path)),
    })
}

pub(crate) fn unreadable(path: &Path, source: io::Error) -> Error {
    Error::SourceUnreadable {
        path: path.display().to_string(),
        source,
    }
}

/// Member names that denote the archive root itself, such as the `./`
/// written by `tar -C dir -cf x.tar .`.
pub(crate) fn is_archive_root(name: &str) -> bool {
    name.split(['/', '\\'])
        .all(|component| component.is_empty() || component == ".")
}

pub(crate) fn foreign_entry(source: &Path, entry: &Entry) -> Error {
    Error::InvalidArgument(format!(
        "entry {} cannot be read from {}",
        entry.path(),
        source.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_formats() {
        assert_eq!(ArchiveFormat::detect(Path::new("a.zip")), Some(ArchiveFormat::Zip));
        assert_eq!(ArchiveFormat::detect(Path::new("a.Jar")), Some(ArchiveFormat::Zip));
        assert_eq!(ArchiveFormat::detect(Path::new("a.TAR")), Some(ArchiveFormat::Tar));
        assert_eq!(ArchiveFormat::detect(Path::new("zip")), None);
        assert_eq!(ArchiveFormat::detect(Path::new("a.txt")), None);
    }

    #[test]
    fn test_archive_root_names() {
        for name in ["", ".", "./", ".//", "/", ".\\"] {
            assert!(is_archive_root(name), "{name:?}");
        }
        for name in ["a", "./a", "..", "./.."] {
            assert!(!is_archive_root(name), "{name:?}");
        }
    }

    #[test]
    fn test_open_source_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = open_source(&dir.path().join("missing")).unwrap_err();
        assert!(err.is_source_error());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_open_source_kinds() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();

        let source = open_source(dir.path()).unwrap();
        assert!(format!("{source:?}").contains("DirectorySource"));

        let source = open_source(&file).unwrap();
        assert!(format!("{source:?}").contains("FileSource"));
        assert_eq!(source.origin(), file.as_path());
    }
}
