//! Construction order of a snapshot.
//!
//! A [`SnapshotPlan`] is the ordered list of insertions that rebuilds the
//! selected tree: every ancestor directory exactly once, before anything
//! below it, and each selected item attached to its immediate parent. The
//! same plan drives both the generated builder and the in-process replay.

use crate::snapshot::SnapshotItem;
use embedfs_memfs::ModTime;
use std::collections::HashSet;

/// One insertion into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Create a directory.
    Dir {
        /// Full path of the directory
        path: String,
        /// Path of the parent directory; empty for the root
        parent: String,
        /// Recorded modification time; zero when synthesized
        mod_time: ModTime,
        /// `true` when no source listed the directory itself
        synthetic: bool,
    },
    /// Create a file.
    File {
        /// Full path of the file
        path: String,
        /// Path of the parent directory; empty for the root
        parent: String,
        /// Byte length of the content
        size: u64,
        /// Recorded modification time
        mod_time: ModTime,
        /// Position of the file's item in the snapshot
        item: usize,
    },
}

impl BuildStep {
    /// Path the step creates.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Dir { path, .. } | Self::File { path, .. } => path,
        }
    }

    /// Path of the directory the step attaches to.
    #[must_use]
    pub fn parent(&self) -> &str {
        match self {
            Self::Dir { parent, .. } | Self::File { parent, .. } => parent,
        }
    }
}

/// Ordered insertions for a snapshot.
///
/// # Examples
///
/// ```
/// use embedfs_codegen::{BuildStep, SnapshotItem, SnapshotPlan};
/// use embedfs_memfs::ModTime;
/// use embedfs_vfs::EntryPath;
///
/// let items = [SnapshotItem::file(EntryPath::new("a/b/c")?, ModTime::ZERO, b"x".to_vec())];
/// let plan = SnapshotPlan::new(&items);
///
/// let paths: Vec<_> = plan.steps().iter().map(BuildStep::path).collect();
/// assert_eq!(paths, ["a", "a/b", "a/b/c"]);
/// # Ok::<(), embedfs_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotPlan {
    steps: Vec<BuildStep>,
}

impl SnapshotPlan {
    /// Plans the insertions for `items`, which must be in ascending path
    /// order.
    #[must_use]
    pub fn new(items: &[SnapshotItem]) -> Self {
        let mut steps = Vec::with_capacity(items.len());
        let mut created: HashSet<String> = HashSet::new();

        for (index, item) in items.iter().enumerate() {
            for ancestor in item.path().ancestors() {
                let path = String::from(ancestor);
                if created.contains(&path) {
                    continue;
                }
                created.insert(path.clone());
                steps.push(BuildStep::Dir {
                    parent: parent_of(&path).to_string(),
                    path,
                    mod_time: ModTime::ZERO,
                    synthetic: true,
                });
            }

            let path = item.path().as_str().to_string();
            let parent = parent_of(&path).to_string();
            match item.content() {
                Some(content) => steps.push(BuildStep::File {
                    path,
                    parent,
                    size: u64::try_from(content.len()).unwrap_or(u64::MAX),
                    mod_time: item.mod_time(),
                    item: index,
                }),
                None => {
                    if created.insert(path.clone()) {
                        steps.push(BuildStep::Dir {
                            path,
                            parent,
                            mod_time: item.mod_time(),
                            synthetic: false,
                        });
                    }
                }
            }
        }

        Self { steps }
    }

    /// The insertions, in execution order.
    #[must_use]
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Number of directory steps.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, BuildStep::Dir { .. }))
            .count()
    }

    /// Number of file steps.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.steps.len() - self.dir_count()
    }
}

fn parent_of(path: &str) -> &str {
    path.rfind('/').map_or("", |pos| &path[..pos])
}
