//! Zip and jar archives.

use super::{Source, foreign_entry, is_archive_root, unreadable};
use crate::entry::{Entry, Locator, SourceId};
use crate::path::EntryPath;
use chrono::NaiveDate;
use embedfs_core::Result;
use embedfs_memfs::ModTime;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// A zip (or jar) archive read as a directory tree.
///
/// Members are placed at the root, or below `mount` when the archive was
/// found inside another source.
#[derive(Debug, Clone)]
pub struct ZipSource {
    archive: PathBuf,
    mount: Option<EntryPath>,
}

impl ZipSource {
    /// Creates a source for `archive`.
    #[must_use]
    pub fn new(archive: impl Into<PathBuf>, mount: Option<EntryPath>) -> Self {
        Self {
            archive: archive.into(),
            mount,
        }
    }

    fn open_archive(&self) -> Result<ZipArchive<BufReader<File>>> {
        let file = File::open(&self.archive).map_err(|e| unreadable(&self.archive, e))?;
        ZipArchive::new(BufReader::new(file))
            .map_err(|e| unreadable(&self.archive, io::Error::other(e)))
    }
}

impl Source for ZipSource {
    fn origin(&self) -> &Path {
        &self.archive
    }

    fn scan(&self, id: SourceId) -> Result<Vec<Entry>> {
        let mut archive = self.open_archive()?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let member = archive
                .by_index(index)
                .map_err(|e| unreadable(&self.archive, io::Error::other(e)))?;

            if is_archive_root(member.name()) {
                debug!(archive = %self.archive.display(), "skipping archive root member");
                continue;
            }

            let path = match EntryPath::new(member.name()) {
                Ok(path) => EntryPath::mounted(self.mount.as_ref(), path),
                Err(err) => {
                    warn!(
                        archive = %self.archive.display(),
                        member = member.name(),
                        error = %err,
                        "skipping archive member"
                    );
                    continue;
                }
            };

            let mod_time = dos_time(member.last_modified());
            entries.push(if member.is_dir() {
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
        let mut member = archive
            .by_index(index)
            .map_err(|e| unreadable(&self.archive, io::Error::other(e)))?;

        let capacity = usize::try_from(member.size()).unwrap_or(0);
        let mut bytes = Vec::with_capacity(capacity);
        member
            .read_to_end(&mut bytes)
            .map_err(|e| unreadable(&self.archive, e))?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}

/// Zip timestamps are local MS-DOS times without a zone; they are read as UTC.
fn dos_time(time: zip::DateTime) -> ModTime {
    NaiveDate::from_ymd_opt(
        i32::from(time.year()),
        u32::from(time.month()),
        u32::from(time.day()),
    )
    .and_then(|date| {
        date.and_hms_opt(
            u32::from(time.hour()),
            u32::from(time.minute()),
            u32::from(time.second()),
        )
    })
    .map_or(ModTime::ZERO, |stamp| ModTime::new(stamp.and_utc().timestamp(), 0))
}
