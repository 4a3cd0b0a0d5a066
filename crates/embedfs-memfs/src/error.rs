//! Errors raised by [`MemFs`](crate::MemFs) operations.

use thiserror::Error;

/// Errors that can occur while building or querying a snapshot.
///
/// Every variant carries the offending path. Use the `is_xxx()` methods to
/// classify an error without matching on its fields.
///
/// # Examples
///
/// ```
/// use embedfs_memfs::MemFsError;
///
/// let error = MemFsError::Sealed {
///     path: "late.txt".to_string(),
/// };
///
/// assert!(error.is_sealed());
/// assert!(!error.is_not_found());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemFsError {
    /// An insertion was attempted after the snapshot was sealed
    #[error("snapshot is sealed, cannot insert: {path}")]
    Sealed {
        /// The path that was being inserted
        path: String,
    },

    /// A node with the same path already exists
    #[error("node already exists: {path}")]
    AlreadyExists {
        /// The duplicated path
        path: String,
    },

    /// No node exists at the given path
    #[error("node not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// A directory was expected but a file was found
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path of the file
        path: String,
    },

    /// A file was expected but a directory was found
    #[error("is a directory: {path}")]
    IsADirectory {
        /// The path of the directory
        path: String,
    },

    /// Path has empty, `.` or `..` components
    #[error("invalid path: {path:?}")]
    InvalidPath {
        /// The rejected path
        path: String,
    },

    /// The parent handle given for an insertion is not the path's parent
    #[error("{parent:?} is not the parent directory of {path}")]
    ParentMismatch {
        /// The path being inserted
        path: String,
        /// The path of the node that was passed as parent
        parent: String,
    },

    /// Declared file size disagrees with the content length
    #[error("declared size {declared} does not match {actual} bytes of content: {path}")]
    SizeMismatch {
        /// The path being inserted
        path: String,
        /// Size passed by the caller
        declared: u64,
        /// Actual content length
        actual: u64,
    },
}

impl MemFsError {
    /// Returns `true` if an insertion was rejected because the snapshot is sealed.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        matches!(self, Self::Sealed { .. })
    }

    /// Returns `true` if this is a not-found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_memfs::MemFs;
    ///
    /// let fs = MemFs::new();
    /// assert!(fs.read("missing.txt").unwrap_err().is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the error comes from a malformed path or a parent
    /// handle that does not match the path.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. } | Self::ParentMismatch { .. })
    }

    /// Returns the path the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Sealed { path }
            | Self::AlreadyExists { path }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::IsADirectory { path }
            | Self::InvalidPath { path }
            | Self::ParentMismatch { path, .. }
            | Self::SizeMismatch { path, .. } => path,
        }
    }
}

/// Type alias for snapshot operation results.
pub type Result<T> = std::result::Result<T, MemFsError>;
