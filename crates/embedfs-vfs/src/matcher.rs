//! Include/exclude path selection.

use embedfs_core::{Error, Result};
use regex::Regex;

/// Returns `true` if `path` qualifies under the given patterns.
///
/// An absent include pattern admits every path; an absent exclude pattern
/// rejects none. A path qualifies when it matches the include pattern and
/// does not match the exclude pattern. Matching is unanchored.
///
/// # Examples
///
/// ```
/// use embedfs_vfs::matcher::matches;
/// use regex::Regex;
///
/// let include = Regex::new(r"\.txt$").unwrap();
/// assert!(matches("notes/final.txt", Some(&include), None));
/// assert!(!matches("notes/final.md", Some(&include), None));
/// assert!(matches("anything", None, None));
/// ```
#[must_use]
pub fn matches(path: &str, include: Option<&Regex>, exclude: Option<&Regex>) -> bool {
    include.is_none_or(|re| re.is_match(path)) && !exclude.is_some_and(|re| re.is_match(path))
}

/// Compiled include and exclude patterns.
///
/// # Examples
///
/// ```
/// use embedfs_vfs::PathMatcher;
///
/// let matcher = PathMatcher::new(Some(r"\.txt$"), Some("draft"))?;
///
/// assert!(matcher.matches("notes/final.txt"));
/// assert!(!matcher.matches("notes/draft.txt"));
/// assert!(!matcher.matches("notes/final.md"));
/// # Ok::<(), embedfs_core::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl PathMatcher {
    /// Compiles the patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternInvalid`] naming the first pattern that does
    /// not compile.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: include.map(compile).transpose()?,
            exclude: exclude.map(compile).transpose()?,
        })
    }

    /// A matcher that admits every path.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            include: None,
            exclude: None,
        }
    }

    /// Returns `true` if `path` qualifies.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        matches(path, self.include.as_ref(), self.exclude.as_ref())
    }

    /// The include pattern as written.
    #[must_use]
    pub fn include(&self) -> Option<&str> {
        self.include.as_ref().map(Regex::as_str)
    }

    /// The exclude pattern as written.
    #[must_use]
    pub fn exclude(&self) -> Option<&str> {
        self.exclude.as_ref().map(Regex::as_str)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::PatternInvalid {
        pattern: pattern.to_string(),
        source: Box::new(e),
    })
}
