//! Collected snapshot contents.

use crate::plan::{BuildStep, SnapshotPlan};
use embedfs_core::{Error, Result};
use embedfs_memfs::{MemFs, ModTime};
use embedfs_vfs::{EntryPath, Vfs};
use std::fmt;
use tracing::{debug, warn};

/// One selected path with its metadata and, for files, its bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SnapshotItem {
    path: EntryPath,
    mod_time: ModTime,
    content: Option<Vec<u8>>,
}

impl SnapshotItem {
    /// A file with its content.
    #[must_use]
    pub const fn file(path: EntryPath, mod_time: ModTime, content: Vec<u8>) -> Self {
        Self {
            path,
            mod_time,
            content: Some(content),
        }
    }

    /// An explicitly selected directory.
    #[must_use]
    pub const fn directory(path: EntryPath, mod_time: ModTime) -> Self {
        Self {
            path,
            mod_time,
            content: None,
        }
    }

    /// Normalized path.
    #[must_use]
    pub const fn path(&self) -> &EntryPath {
        &self.path
    }

    /// Modification time recorded by the source.
    #[must_use]
    pub const fn mod_time(&self) -> ModTime {
        self.mod_time
    }

    /// File bytes; `None` for directories.
    #[must_use]
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.content.is_none()
    }
}

impl fmt::Debug for SnapshotItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotItem")
            .field("path", &self.path)
            .field("mod_time", &self.mod_time)
            .field("size", &self.content.as_ref().map(Vec::len))
            .finish()
    }
}

/// The selected subset of a [`Vfs`], read into memory.
///
/// Items are kept in ascending path order, which is the order of every
/// emitted constant and builder step.
///
/// # Examples
///
/// ```
/// use embedfs_codegen::Snapshot;
/// use embedfs_vfs::Vfs;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::create_dir(dir.path().join("sub"))?;
/// std::fs::write(dir.path().join("sub/b.bin"), [0u8, 255])?;
///
/// let mut vfs = Vfs::new();
/// vfs.add_source(dir.path(), false)?;
///
/// let snapshot = Snapshot::collect(&vfs, &vfs.list_matches(None, None, false)?)?;
/// let fs = snapshot.replay()?;
///
/// assert!(fs.is_sealed());
/// assert_eq!(fs.read("sub/b.bin")?, [0, 255]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    items: Vec<SnapshotItem>,
}

impl Snapshot {
    /// Reads every selected path from `vfs`.
    ///
    /// Paths are sorted and deduplicated first. A file's size is taken from
    /// the bytes actually read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for a path `vfs` never registered and
    /// [`Error::SourceUnreadable`] if a file cannot be read.
    pub fn collect<S: AsRef<str>>(vfs: &Vfs, paths: &[S]) -> Result<Self> {
        let mut keys = paths
            .iter()
            .map(|path| EntryPath::new(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        keys.sort();
        keys.dedup();

        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            let entry = vfs.find(key.as_str())?;
            if entry.is_dir() {
                items.push(SnapshotItem::directory(key, entry.mod_time()));
                continue;
            }

            let content = vfs.read_to_vec(entry)?;
            if u64::try_from(content.len()).ok() != Some(entry.size()) {
                warn!(
                    path = %key,
                    listed = entry.size(),
                    read = content.len(),
                    "file size changed while reading"
                );
            }
            debug!(path = %key, size = content.len(), "collected file");
            items.push(SnapshotItem::file(key, entry.mod_time(), content));
        }

        Ok(Self { items })
    }

    /// Builds a snapshot from items already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if two items share a path.
    pub fn from_items(mut items: Vec<SnapshotItem>) -> Result<Self> {
        items.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(pair) = items.windows(2).find(|pair| pair[0].path == pair[1].path) {
            return Err(Error::InvalidArgument(format!(
                "duplicate snapshot path {}",
                pair[0].path
            )));
        }
        Ok(Self { items })
    }

    /// Items in ascending path order.
    #[must_use]
    pub fn items(&self) -> &[SnapshotItem] {
        &self.items
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_dir()).count()
    }

    /// Total number of content bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.items
            .iter()
            .filter_map(SnapshotItem::content)
            .map(<[u8]>::len)
            .sum()
    }

    /// Returns `true` if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plans the insertions that rebuild this snapshot.
    #[must_use]
    pub fn plan(&self) -> SnapshotPlan {
        SnapshotPlan::new(&self.items)
    }

    /// Executes the plan into a fresh [`MemFs`] and seals it.
    ///
    /// This is the in-process equivalent of the generated builder function;
    /// the data is owned instead of borrowed from constants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] if the tree is inconsistent,
    /// for example a file placed below another file.
    pub fn replay(&self) -> Result<MemFs> {
        let mut fs = MemFs::new();

        for step in self.plan().steps() {
            match step {
                BuildStep::Dir {
                    path,
                    parent,
                    mod_time,
                    ..
                } => {
                    fs.add_dir(fs.lookup(parent), path, *mod_time)?;
                }
                BuildStep::File {
                    path,
                    parent,
                    size,
                    mod_time,
                    item,
                } => {
                    let content = self
                        .items
                        .get(*item)
                        .and_then(SnapshotItem::content)
                        .ok_or_else(|| Error::InvariantViolation {
                            message: format!("no content for {path}"),
                            source: None,
                        })?;
                    fs.add_file(
                        fs.lookup(parent),
                        path,
                        *size,
                        *mod_time,
                        content.to_vec(),
                    )?;
                }
            }
        }

        fs.seal();
        Ok(fs)
    }
}
