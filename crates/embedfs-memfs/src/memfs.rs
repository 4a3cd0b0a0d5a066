//! The snapshot arena.
//!
//! Nodes are stored in a vector and indexed by normalized path. Parent links
//! are plain [`NodeId`]s, so building never has to follow or mutate a
//! back-reference; lookups always go through the path index.

use crate::error::{MemFsError, Result};
use crate::node::{Node, NodeId};
use crate::time::ModTime;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Cursor;

const ROOT: NodeId = NodeId(0);

/// An in-memory filesystem snapshot that can be sealed against mutation.
///
/// A fresh `MemFs` contains only the root directory (empty path). Files and
/// directories are added while the snapshot is open; [`MemFs::seal`] closes
/// it for good. Queries work at any time, but consumers are expected to only
/// ever see sealed snapshots.
///
/// Paths are relative and `/`-separated. Leading and trailing slashes are
/// ignored; empty, `.` and `..` components are rejected.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; a sealed snapshot can be shared freely.
///
/// # Examples
///
/// ```
/// use embedfs_memfs::{MemFs, ModTime};
///
/// let mut fs = MemFs::new();
/// fs.add_file(None, "a/b/c.txt", 3, ModTime::new(5, 0), b"abc".to_vec())?;
/// fs.seal();
///
/// // ancestors were created implicitly
/// assert!(fs.get("a").unwrap().is_dir());
/// assert!(fs.get("a/b").unwrap().mod_time().is_zero());
/// assert_eq!(fs.read("a/b/c.txt")?, b"abc");
/// # Ok::<(), embedfs_memfs::MemFsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemFs {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    sealed: bool,
}

impl MemFs {
    /// Creates an empty, unsealed snapshot holding only the root.
    #[must_use]
    pub fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(String::new(), ROOT);
        Self {
            nodes: vec![Node::directory(String::new(), None, ModTime::ZERO)],
            index,
            sealed: false,
        }
    }

    /// Handle of the root directory.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        ROOT
    }

    /// Returns `true` once [`MemFs::seal`] has been called.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Seals the snapshot. Every later insertion fails with
    /// [`MemFsError::Sealed`].
    ///
    /// Sealing an already sealed snapshot is a no-op.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Adds a file.
    ///
    /// With `parent: None` the parent directory is resolved by path and
    /// created (along with its ancestors) if it does not exist yet. With
    /// `Some(id)`, `id` must be the directory whose path is the file's
    /// immediate parent.
    ///
    /// # Errors
    ///
    /// - [`MemFsError::Sealed`] after [`MemFs::seal`]
    /// - [`MemFsError::InvalidPath`] for malformed or empty paths
    /// - [`MemFsError::AlreadyExists`] if the path is taken
    /// - [`MemFsError::ParentMismatch`] if `parent` is not the parent directory
    /// - [`MemFsError::NotADirectory`] if the parent is a file
    /// - [`MemFsError::SizeMismatch`] if `size` differs from the content length
    pub fn add_file(
        &mut self,
        parent: Option<NodeId>,
        path: &str,
        size: u64,
        mod_time: ModTime,
        data: impl Into<Cow<'static, [u8]>>,
    ) -> Result<NodeId> {
        let data = data.into();
        let actual = data.len() as u64;
        if actual != size {
            return Err(MemFsError::SizeMismatch {
                path: path.to_string(),
                declared: size,
                actual,
            });
        }
        self.insert(parent, path, |path, parent| Node {
            path,
            parent: Some(parent),
            children: Vec::new(),
            is_dir: false,
            size,
            mod_time,
            data,
        })
    }

    /// Adds an explicit directory.
    ///
    /// Parent resolution follows the same rules as [`MemFs::add_file`].
    ///
    /// # Errors
    ///
    /// Same as [`MemFs::add_file`], minus the size check.
    pub fn add_dir(
        &mut self,
        parent: Option<NodeId>,
        path: &str,
        mod_time: ModTime,
    ) -> Result<NodeId> {
        self.insert(parent, path, |path, parent| {
            Node::directory(path, Some(parent), mod_time)
        })
    }

    /// Returns the directory at `path`, creating it and any missing
    /// ancestors with size 0 and [`ModTime::ZERO`].
    ///
    /// Idempotent: an existing directory is returned unchanged, even after
    /// sealing.
    ///
    /// # Errors
    ///
    /// - [`MemFsError::NotADirectory`] if the path or an ancestor is a file
    /// - [`MemFsError::Sealed`] if something would have to be created
    /// - [`MemFsError::InvalidPath`] for malformed paths
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_memfs::MemFs;
    ///
    /// let mut fs = MemFs::new();
    /// let first = fs.get_or_create_dir("x/y")?;
    /// let second = fs.get_or_create_dir("/x/y/")?;
    /// assert_eq!(first, second);
    /// assert_eq!(fs.dir_count(), 3); // root, x, x/y
    /// # Ok::<(), embedfs_memfs::MemFsError>(())
    /// ```
    pub fn get_or_create_dir(&mut self, path: &str) -> Result<NodeId> {
        let path = normalize(path)?;
        if let Some(&id) = self.index.get(&path) {
            return if self.nodes[id.0].is_dir {
                Ok(id)
            } else {
                Err(MemFsError::NotADirectory { path })
            };
        }
        if self.sealed {
            return Err(MemFsError::Sealed { path });
        }

        let ends = path
            .match_indices('/')
            .map(|(i, _)| i)
            .chain(std::iter::once(path.len()));
        let mut parent = ROOT;
        for end in ends {
            let prefix = &path[..end];
            let existing = self.index.get(prefix).copied();
            parent = match existing {
                Some(id) if self.nodes[id.0].is_dir => id,
                Some(_) => {
                    return Err(MemFsError::NotADirectory {
                        path: prefix.to_string(),
                    });
                }
                None => self.push(
                    parent,
                    Node::directory(prefix.to_string(), Some(parent), ModTime::ZERO),
                ),
            };
        }
        Ok(parent)
    }

    /// Looks up a node handle by path. The empty path is the root.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        let path = normalize(path).ok()?;
        self.index.get(&path).copied()
    }

    /// Returns the node at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.lookup(path).map(|id| &self.nodes[id.0])
    }

    /// Returns the node behind a handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Follows a node's back-reference to its directory.
    #[must_use]
    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent.and_then(|id| self.node(id))
    }

    /// Returns the content of the file at `path`.
    ///
    /// # Errors
    ///
    /// [`MemFsError::NotFound`] if nothing exists at `path`,
    /// [`MemFsError::IsADirectory`] if it is a directory.
    pub fn read(&self, path: &str) -> Result<&[u8]> {
        let node = self.get(path).ok_or_else(|| MemFsError::NotFound {
            path: path.to_string(),
        })?;
        if node.is_dir {
            return Err(MemFsError::IsADirectory {
                path: path.to_string(),
            });
        }
        Ok(&node.data)
    }

    /// Opens the file at `path` as a `Read + Seek` cursor.
    ///
    /// # Errors
    ///
    /// Same as [`MemFs::read`].
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_memfs::{MemFs, ModTime};
    /// use std::io::Read;
    ///
    /// let mut fs = MemFs::new();
    /// fs.add_file(None, "n.txt", 2, ModTime::ZERO, &b"42"[..])?;
    ///
    /// let mut text = String::new();
    /// fs.open("n.txt")?.read_to_string(&mut text).unwrap();
    /// assert_eq!(text, "42");
    /// # Ok::<(), embedfs_memfs::MemFsError>(())
    /// ```
    pub fn open(&self, path: &str) -> Result<Cursor<&[u8]>> {
        self.read(path).map(Cursor::new)
    }

    /// Lists the direct children of the directory at `path`, sorted by path.
    ///
    /// # Errors
    ///
    /// [`MemFsError::NotFound`] if nothing exists at `path`,
    /// [`MemFsError::NotADirectory`] if it is a file.
    pub fn read_dir(&self, path: &str) -> Result<Vec<&Node>> {
        let node = self.get(path).ok_or_else(|| MemFsError::NotFound {
            path: path.to_string(),
        })?;
        if !node.is_dir {
            return Err(MemFsError::NotADirectory {
                path: path.to_string(),
            });
        }
        Ok(self.sorted_children(node))
    }

    /// Iterates over every node depth-first, root included, visiting
    /// siblings in path order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            fs: self,
            stack: vec![ROOT],
        }
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the snapshot holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of file nodes.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_dir).count()
    }

    /// Number of directory nodes, root included.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_dir).count()
    }

    fn sorted_children(&self, node: &Node) -> Vec<&Node> {
        let mut children: Vec<&Node> = node.children.iter().map(|id| &self.nodes[id.0]).collect();
        children.sort_by(|a, b| a.path.cmp(&b.path));
        children
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        raw_path: &str,
        make: impl FnOnce(String, NodeId) -> Node,
    ) -> Result<NodeId> {
        if self.sealed {
            return Err(MemFsError::Sealed {
                path: raw_path.to_string(),
            });
        }
        let path = normalize(raw_path)?;
        if path.is_empty() {
            return Err(MemFsError::InvalidPath {
                path: raw_path.to_string(),
            });
        }
        if self.index.contains_key(&path) {
            return Err(MemFsError::AlreadyExists { path });
        }

        let parent_path = parent_of(&path);
        let parent = match parent {
            Some(id) => {
                let node = self.node(id).ok_or_else(|| MemFsError::ParentMismatch {
                    path: path.clone(),
                    parent: format!("#{}", id.0),
                })?;
                if node.path != parent_path {
                    return Err(MemFsError::ParentMismatch {
                        path,
                        parent: node.path.clone(),
                    });
                }
                if !node.is_dir {
                    return Err(MemFsError::NotADirectory {
                        path: node.path.clone(),
                    });
                }
                id
            }
            None => self.get_or_create_dir(parent_path)?,
        };

        let node = make(path, parent);
        Ok(self.push(parent, node))
    }

    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.path.clone(), id);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator returned by [`MemFs::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    fs: &'a MemFs,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let fs = self.fs;
        let id = self.stack.pop()?;
        let node = &fs.nodes[id.0];
        let mut children = node.children.clone();
        children.sort_by(|a, b| fs.nodes[b.0].path.cmp(&fs.nodes[a.0].path));
        self.stack.extend(children);
        Some(node)
    }
}

fn normalize(path: &str) -> Result<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed
        .split('/')
        .any(|c| c.is_empty() || c == "." || c == "..")
    {
        return Err(MemFsError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parent_of(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}
