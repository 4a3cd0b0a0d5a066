//! Error types for embedfs.
//!
//! One error hierarchy is shared by the aggregator, the encoder, and the
//! command-line driver. Every failure is unrecoverable for the current run:
//! the driver reports it and exits without leaving output behind.
//!
//! # Examples
//!
//! ```
//! use embedfs_core::{Error, Result};
//!
//! fn require_prefix(prefix: &str) -> Result<()> {
//!     if prefix.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "prefix cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_prefix("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use embedfs_memfs::MemFsError;
use thiserror::Error;

/// Main error type for embedfs.
#[derive(Error, Debug)]
pub enum Error {
    /// An input source cannot be opened, listed, or read.
    #[error("cannot read source {path}")]
    SourceUnreadable {
        /// The file, directory, or archive that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A path was never registered by any source.
    #[error("entry not found: {path}")]
    NotFound {
        /// The missing path
        path: String,
    },

    /// A path cannot be normalized into an entry path.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The rejected path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// An include or exclude pattern failed to compile.
    #[error("invalid pattern {pattern:?}")]
    PatternInvalid {
        /// The pattern as given by the user
        pattern: String,
        /// Compilation error from the regex engine
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The output destination cannot be created or written.
    #[error("cannot write output {path}")]
    OutputUnwritable {
        /// Destination path, or `<stdout>`
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Internal misuse, such as inserting into a sealed snapshot or placing
    /// a file underneath another file.
    #[error("invariant violated: {message}")]
    InvariantViolation {
        /// Description of the violated invariant
        message: String,
        /// Snapshot error that exposed the violation, if any
        #[source]
        source: Option<MemFsError>,
    },

    /// Configuration is invalid or cannot be loaded.
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument passed to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The output template failed to render.
    #[error("rendering failed: {message}")]
    RenderFailed {
        /// Description of the rendering failure
        message: String,
    },
}

impl Error {
    /// Returns `true` if a source could not be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_core::Error;
    /// use std::io;
    ///
    /// let err = Error::SourceUnreadable {
    ///     path: "assets".to_string(),
    ///     source: io::Error::from(io::ErrorKind::NotFound),
    /// };
    /// assert!(err.is_source_error());
    /// ```
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceUnreadable { .. })
    }

    /// Returns `true` if a path was not registered.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if a path was rejected during normalization.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if a pattern failed to compile.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::PatternInvalid { .. })
    }

    /// Returns `true` if the output could not be written.
    #[must_use]
    pub const fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputUnwritable { .. })
    }

    /// Returns `true` for internal invariant violations.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad prefix".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` for errors caused by user input (arguments, patterns,
    /// configuration, paths).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::ConfigError { .. }
                | Self::PatternInvalid { .. }
                | Self::InvalidPath { .. }
                | Self::NotFound { .. }
        )
    }
}

impl From<MemFsError> for Error {
    fn from(err: MemFsError) -> Self {
        Self::InvariantViolation {
            message: format!("snapshot rejected {}", err.path()),
            source: Some(err),
        }
    }
}

/// Result type alias for embedfs operations.
///
/// # Examples
///
/// ```
/// use embedfs_core::{Error, Result};
///
/// fn non_empty(value: &str) -> Result<&str> {
///     if value.is_empty() {
///         return Err(Error::InvalidArgument("empty value".to_string()));
///     }
///     Ok(value)
/// }
///
/// assert!(non_empty("x").is_ok());
/// assert!(non_empty("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_source_error_detection() {
        let err = Error::SourceUnreadable {
            path: "missing.zip".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.is_source_error());
        assert!(!err.is_user_error());
        assert!(err.to_string().contains("missing.zip"));
    }

    #[test]
    fn test_pattern_error_detection() {
        let err = Error::PatternInvalid {
            pattern: "(".to_string(),
            source: "unclosed group".into(),
        };
        assert!(err.is_pattern_error());
        assert!(err.is_user_error());
    }

    #[test]
    fn test_output_error_detection() {
        let err = Error::OutputUnwritable {
            path: "/ro/out.rs".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.is_output_error());
        assert!(!err.is_source_error());
    }

    #[test]
    fn test_memfs_error_becomes_invariant_violation() {
        let err: Error = MemFsError::Sealed {
            path: "late.txt".to_string(),
        }
        .into();
        assert!(err.is_invariant_violation());
        assert!(err.to_string().contains("late.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_user_error_classification() {
        assert!(Error::InvalidArgument("x".to_string()).is_user_error());
        assert!(
            Error::NotFound {
                path: "a".to_string()
            }
            .is_user_error()
        );
        assert!(
            !Error::RenderFailed {
                message: "x".to_string()
            }
            .is_user_error()
        );
    }
}
