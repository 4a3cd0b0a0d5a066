//! Snapshot nodes.

use crate::time::ModTime;
use std::borrow::Cow;
use std::fmt;

/// Handle to a node inside a [`MemFs`](crate::MemFs) arena.
///
/// Handles are only meaningful for the snapshot that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One file or directory of a snapshot.
///
/// The node's identity is its full normalized path. The parent link is a
/// non-owning [`NodeId`]; the root is the only node without one.
#[derive(Clone)]
pub struct Node {
    pub(crate) path: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_dir: bool,
    pub(crate) size: u64,
    pub(crate) mod_time: ModTime,
    pub(crate) data: Cow<'static, [u8]>,
}

impl Node {
    pub(crate) fn directory(path: String, parent: Option<NodeId>, mod_time: ModTime) -> Self {
        Self {
            path,
            parent,
            children: Vec::new(),
            is_dir: true,
            size: 0,
            mod_time,
            data: Cow::Borrowed(&[]),
        }
    }

    /// Full path of the node; empty for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path component; empty for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_memfs::{MemFs, ModTime};
    ///
    /// let mut fs = MemFs::new();
    /// fs.add_file(None, "css/site.css", 0, ModTime::ZERO, &b""[..])?;
    /// assert_eq!(fs.get("css/site.css").unwrap().name(), "site.css");
    /// # Ok::<(), embedfs_memfs::MemFsError>(())
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    /// Handle of the owning directory, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handles of the direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` for regular files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        !self.is_dir
    }

    /// Size in bytes; 0 for directories.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Modification time recorded when the snapshot was generated.
    #[must_use]
    pub const fn mod_time(&self) -> ModTime {
        self.mod_time
    }

    /// File content; empty for directories.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("is_dir", &self.is_dir)
            .field("size", &self.size)
            .field("mod_time", &self.mod_time)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
