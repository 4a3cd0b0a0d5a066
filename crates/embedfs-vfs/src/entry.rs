//! Entries of the aggregated tree.

use crate::path::EntryPath;
use embedfs_memfs::ModTime;
use std::fmt;
use std::path::PathBuf;

/// Kind of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file with readable content
    File,
    /// A directory
    Directory,
}

impl EntryKind {
    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("dir"),
        }
    }
}

/// Identifies the mounted source an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub(crate) usize);

impl SourceId {
    /// Position of the source in mount order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Where a source finds an entry's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A directory synthesized because a descendant needed it
    Synthetic,
    /// A directory that a source listed explicitly
    Directory,
    /// A file on the host filesystem
    Host(PathBuf),
    /// A member of an archive, by position
    Member(usize),
}

/// One item of the aggregated tree.
///
/// Entries are snapshots of source metadata taken when the source was
/// added. Content is read lazily through [`Vfs::read`](crate::Vfs::read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: EntryPath,
    kind: EntryKind,
    size: u64,
    mod_time: ModTime,
    source: SourceId,
    locator: Locator,
}

impl Entry {
    /// Creates a file entry.
    #[must_use]
    pub const fn file(
        path: EntryPath,
        size: u64,
        mod_time: ModTime,
        source: SourceId,
        locator: Locator,
    ) -> Self {
        Self {
            path,
            kind: EntryKind::File,
            size,
            mod_time,
            source,
            locator,
        }
    }

    /// Creates a directory entry listed by a source.
    #[must_use]
    pub const fn directory(path: EntryPath, mod_time: ModTime, source: SourceId) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
            size: 0,
            mod_time,
            source,
            locator: Locator::Directory,
        }
    }

    pub(crate) const fn synthetic(path: EntryPath, source: SourceId) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
            size: 0,
            mod_time: ModTime::ZERO,
            source,
            locator: Locator::Synthetic,
        }
    }

    /// Normalized path of the entry.
    #[must_use]
    pub const fn path(&self) -> &EntryPath {
        &self.path
    }

    /// File or directory.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Byte length; 0 for directories.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification time; [`ModTime::ZERO`] when the source has none.
    #[must_use]
    pub const fn mod_time(&self) -> ModTime {
        self.mod_time
    }

    /// The source that registered the entry.
    #[must_use]
    pub const fn source(&self) -> SourceId {
        self.source
    }

    /// Where the source finds the bytes.
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Returns `true` for directories synthesized for a descendant.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self.locator, Locator::Synthetic)
    }

    pub(crate) fn into_directory(self) -> Self {
        Self {
            kind: EntryKind::Directory,
            size: 0,
            locator: Locator::Directory,
            ..self
        }
    }
}
