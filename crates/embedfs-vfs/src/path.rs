//! Normalized entry paths.

use embedfs_core::{Error, Result};
use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

/// A validated path inside the aggregated tree.
///
/// `EntryPath` uses the same conventions on every platform:
/// - Relative to the tree root (leading separators are dropped)
/// - Forward slashes as separators (backslashes are converted)
/// - No trailing slash, no empty or `.` components
/// - Free of parent directory references (`..`)
/// - Never empty
///
/// Ordering is the byte order of the normalized string, which is the order
/// every listing and generated snapshot uses.
///
/// # Examples
///
/// ```
/// use embedfs_vfs::EntryPath;
///
/// let path = EntryPath::new("./static\\css//site.css/")?;
/// assert_eq!(path.as_str(), "static/css/site.css");
/// assert_eq!(path.file_name(), "site.css");
///
/// assert!(EntryPath::new("../escape").is_err());
/// assert!(EntryPath::new("/").is_err());
/// # Ok::<(), embedfs_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    /// Normalizes `path` into an entry path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is empty after
    /// normalization or contains a `..` component.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let unified = raw.replace('\\', "/");

        let mut components = Vec::new();
        for component in unified.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    return Err(Error::InvalidPath {
                        path: raw.to_string(),
                        reason: "parent directory references are not allowed".to_string(),
                    });
                }
                name => components.push(name),
            }
        }

        if components.is_empty() {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        Ok(Self(components.join("/")))
    }

    /// Converts a host path, relative to some source root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is not valid UTF-8 or
    /// fails [`EntryPath::new`].
    pub fn from_host(path: &Path) -> Result<Self> {
        let text = path.to_str().ok_or_else(|| Error::InvalidPath {
            path: path.display().to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        Self::new(text)
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last component of the path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Returns the parent path, or `None` for top-level entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_vfs::EntryPath;
    ///
    /// let path = EntryPath::new("a/b/c")?;
    /// assert_eq!(path.parent().unwrap().as_str(), "a/b");
    /// assert!(EntryPath::new("top")?.parent().is_none());
    /// # Ok::<(), embedfs_core::Error>(())
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('/').map(|pos| Self(self.0[..pos].to_string()))
    }

    /// Proper ancestors, outermost first.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_vfs::EntryPath;
    ///
    /// let path = EntryPath::new("a/b/c")?;
    /// let ancestors: Vec<_> = path.ancestors().map(|p| p.to_string()).collect();
    /// assert_eq!(ancestors, ["a", "a/b"]);
    /// # Ok::<(), embedfs_core::Error>(())
    /// ```
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        self.0
            .match_indices('/')
            .map(|(pos, _)| Self(self.0[..pos].to_string()))
    }

    /// Appends `child` below this path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `child` fails normalization.
    pub fn join(&self, child: impl AsRef<str>) -> Result<Self> {
        let child = Self::new(child)?;
        Ok(Self(format!("{}/{}", self.0, child.0)))
    }

    /// Prefixes `path` with `mount`, if any.
    pub(crate) fn mounted(mount: Option<&Self>, path: Self) -> Self {
        match mount {
            Some(mount) => Self(format!("{}/{}", mount.0, path.0)),
            None => path,
        }
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntryPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<EntryPath> for String {
    fn from(path: EntryPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(EntryPath::new("a/b").unwrap().as_str(), "a/b");
        assert_eq!(EntryPath::new("/a/b/").unwrap().as_str(), "a/b");
        assert_eq!(EntryPath::new("a\\b\\c").unwrap().as_str(), "a/b/c");
        assert_eq!(EntryPath::new("./a/./b").unwrap().as_str(), "a/b");
        assert_eq!(EntryPath::new("a//b").unwrap().as_str(), "a/b");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(EntryPath::new("").unwrap_err().is_invalid_path());
        assert!(EntryPath::new("./").unwrap_err().is_invalid_path());
        assert!(EntryPath::new("a/../b").unwrap_err().is_invalid_path());
        assert!(EntryPath::new("..\\up").unwrap_err().is_invalid_path());
    }

    #[test]
    fn test_dots_inside_names_allowed() {
        let path = EntryPath::new("v1..2/file..txt").unwrap();
        assert_eq!(path.as_str(), "v1..2/file..txt");
    }

    #[test]
    fn test_parent_and_ancestors() {
        let path = EntryPath::new("x/y/z.txt").unwrap();
        assert_eq!(path.parent().unwrap().as_str(), "x/y");
        assert_eq!(path.file_name(), "z.txt");
        assert_eq!(path.ancestors().count(), 2);

        let top = EntryPath::new("z.txt").unwrap();
        assert!(top.parent().is_none());
        assert_eq!(top.ancestors().count(), 0);
    }

    #[test]
    fn test_join_and_mount() {
        let base = EntryPath::new("lib/app.jar").unwrap();
        assert_eq!(base.join("META-INF/x").unwrap().as_str(), "lib/app.jar/META-INF/x");
        assert!(base.join("..").is_err());

        let member = EntryPath::new("inner.txt").unwrap();
        assert_eq!(
            EntryPath::mounted(Some(&base), member.clone()).as_str(),
            "lib/app.jar/inner.txt"
        );
        assert_eq!(EntryPath::mounted(None, member).as_str(), "inner.txt");
    }

    #[test]
    fn test_ordering_is_byte_order() {
        let mut paths = vec![
            EntryPath::new("b").unwrap(),
            EntryPath::new("a/z").unwrap(),
            EntryPath::new("A").unwrap(),
            EntryPath::new("a").unwrap(),
        ];
        paths.sort();
        let sorted: Vec<_> = paths.iter().map(EntryPath::as_str).collect();
        assert_eq!(sorted, ["A", "a", "a/z", "b"]);
    }
}
