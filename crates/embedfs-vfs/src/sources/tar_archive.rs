//! Uncompressed tar archives.

use super::{Source, foreign_entry, is_archive_root, unreadable};
use crate::entry::{Entry, Locator, SourceId};
use crate::path::EntryPath;
use embedfs_core::Result;
use embedfs_memfs::ModTime;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, warn};

/// A tar archive read as a directory tree.
///
/// Regular files and directories are listed; links and special members are
/// skipped. Members are addressed by their position in the archive.
#[derive(Debug, Clone)]
pub struct TarSource {
    archive: PathBuf,
    mount: Option<EntryPath>,
}

impl TarSource {
    /// Creates a source for `archive`.
    #[must_use]
    pub fn new(archive: impl Into<PathBuf>, mount: Option<EntryPath>) -> Self {
        Self {
            archive: archive.into(),
            mount,
        }
    }

    fn open_archive(&self) -> Result<Archive<BufReader<File>>> {
        let file = File::open(&self.archive).map_err(|e| unreadable(&self.archive, e))?;
        Ok(Archive::new(BufReader::new(file)))
    }
}

impl Source for TarSource {
    fn origin(&self) -> &Path {
        &self.archive
    }

    fn scan(&self, id: SourceId) -> Result<Vec<Entry>> {
        let mut archive = self.open_archive()?;
        let members = archive
            .entries()
            .map_err(|e| unreadable(&self.archive, e))?;

        let mut entries = Vec::new();
        for (index, member) in members.enumerate() {
            let member = member.map_err(|e| unreadable(&self.archive, e))?;
            let name = member
                .path()
                .map_err(|e| unreadable(&self.archive, e))?
                .into_owned();

            let entry_type = member.header().entry_type();
            if !entry_type.is_file() && !entry_type.is_dir() {
                debug!(archive = %self.archive.display(), member = %name.display(), "skipping non-regular member");
                continue;
            }

            if is_archive_root(&name.to_string_lossy()) {
                debug!(archive = %self.archive.display(), "skipping archive root member");
                continue;
            }

            let path = match EntryPath::from_host(&name) {
                Ok(path) => EntryPath::mounted(self.mount.as_ref(), path),
                Err(err) => {
                    warn!(
                        archive = %self.archive.display(),
                        member = %name.display(),
                        error = %err,
                        "skipping archive member"
                    );
                    continue;
                }
            };

            let mod_time = member.header().mtime().map_or(ModTime::ZERO, |secs| {
                ModTime::new(i64::try_from(secs).unwrap_or(i64::MAX), 0)
            });

            entries.push(if entry_type.is_dir() {
                Entry::directory(path, mod_time, id)
            } else {
                Entry::file(path, member.size(), mod_time, id, Locator::Member(index))
            });
        }

        Ok(entries)
    }

    fn open(&self, entry: &Entry) -> Result<Box<dyn Read>> {
        let Locator::Member(index) = *entry.locator() else {
            return Err(foreign_entry(&self.archive, entry));
        };

        let mut archive = self.open_archive()?;
        let members = archive
            .entries()
            .map_err(|e| unreadable(&self.archive, e))?;

        for (position, member) in members.enumerate() {
            let mut member = member.map_err(|e| unreadable(&self.archive, e))?;
            if position != index {
                continue;
            }
            let capacity = usize::try_from(member.size()).unwrap_or(0);
            let mut bytes = Vec::with_capacity(capacity);
            member
                .read_to_end(&mut bytes)
                .map_err(|e| unreadable(&self.archive, e))?;
            return Ok(Box::new(Cursor::new(bytes)));
        }

        Err(foreign_entry(&self.archive, entry))
    }
}
