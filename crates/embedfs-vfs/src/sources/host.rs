//! Host files and directory trees.

use super::{Source, foreign_entry, unreadable};
use crate::entry::{Entry, Locator, SourceId};
use crate::path::EntryPath;
use embedfs_core::{Error, Result};
use embedfs_memfs::ModTime;
use std::fs::{self, File, Metadata};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A single host file, mounted at the root under its file name.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn origin(&self) -> &Path {
        &self.path
    }

    fn scan(&self, id: SourceId) -> Result<Vec<Entry>> {
        let metadata = fs::metadata(&self.path).map_err(|e| unreadable(&self.path, e))?;
        let name = self.path.file_name().ok_or_else(|| Error::InvalidPath {
            path: self.path.display().to_string(),
            reason: "file source has no file name".to_string(),
        })?;
        let path = EntryPath::from_host(Path::new(name))?;

        Ok(vec![Entry::file(
            path,
            metadata.len(),
            mod_time(&metadata),
            id,
            Locator::Host(self.path.clone()),
        )])
    }

    fn open(&self, entry: &Entry) -> Result<Box<dyn Read>> {
        open_host(&self.path, entry)
    }
}

/// A host directory; every descendant is keyed relative to it.
///
/// Children are visited in file-name order and symbolic links are followed.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source for the tree below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Source for DirectorySource {
    fn origin(&self) -> &Path {
        &self.root
    }

    fn scan(&self, id: SourceId) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for item in WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let item = item.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                unreadable(&path, io::Error::from(e))
            })?;

            let relative = item
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| item.path());
            let path = match EntryPath::from_host(relative) {
                Ok(path) => path,
                Err(err) => {
                    warn!(path = %item.path().display(), error = %err, "skipping unrepresentable path");
                    continue;
                }
            };

            let file_type = item.file_type();
            if file_type.is_dir() {
                let metadata = item.metadata().map_err(|e| {
                    unreadable(item.path(), io::Error::from(e))
                })?;
                entries.push(Entry::directory(path, mod_time(&metadata), id));
            } else if file_type.is_file() {
                let metadata = item.metadata().map_err(|e| {
                    unreadable(item.path(), io::Error::from(e))
                })?;
                entries.push(Entry::file(
                    path,
                    metadata.len(),
                    mod_time(&metadata),
                    id,
                    Locator::Host(item.path().to_path_buf()),
                ));
            } else {
                debug!(path = %item.path().display(), "skipping special file");
            }
        }

        Ok(entries)
    }

    fn open(&self, entry: &Entry) -> Result<Box<dyn Read>> {
        open_host(&self.root, entry)
    }
}

fn open_host(origin: &Path, entry: &Entry) -> Result<Box<dyn Read>> {
    match entry.locator() {
        Locator::Host(path) => {
            let file = File::open(path).map_err(|e| unreadable(path, e))?;
            Ok(Box::new(file))
        }
        _ => Err(foreign_entry(origin, entry)),
    }
}

fn mod_time(metadata: &Metadata) -> ModTime {
    metadata.modified().map_or(ModTime::ZERO, ModTime::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.bin"), [0x00, 0xff]).unwrap();
        dir
    }

    #[test]
    fn test_directory_scan() {
        let dir = fixture();
        let entries = DirectorySource::new(dir.path()).scan(SourceId(0)).unwrap();

        let listed: Vec<_> = entries
            .iter()
            .map(|e| (e.path().as_str(), e.is_dir(), e.size()))
            .collect();
        assert_eq!(
            listed,
            [("a.txt", false, 2), ("sub", true, 0), ("sub/b.bin", false, 2)]
        );
        assert!(entries.iter().all(|e| !e.mod_time().is_zero()));
    }

    #[test]
    fn test_directory_open() {
        let dir = fixture();
        let source = DirectorySource::new(dir.path());
        let entries = source.scan(SourceId(0)).unwrap();

        let mut bytes = Vec::new();
        source
            .open(&entries[2])
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes, [0x00, 0xff]);
    }

    #[test]
    fn test_file_source_uses_file_name() {
        let dir = fixture();
        let source = FileSource::new(dir.path().join("sub").join("b.bin"));
        let entries = source.scan(SourceId(4)).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path().as_str(), "b.bin");
        assert_eq!(entries[0].source().index(), 4);
    }

    #[test]
    fn test_open_rejects_directory_entry() {
        let dir = fixture();
        let source = DirectorySource::new(dir.path());
        let entries = source.scan(SourceId(0)).unwrap();
        assert!(source.open(&entries[1]).is_err());
    }

    #[test]
    fn test_missing_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = DirectorySource::new(dir.path().join("gone"))
            .scan(SourceId(0))
            .unwrap_err();
        assert!(err.is_source_error());
    }
}
