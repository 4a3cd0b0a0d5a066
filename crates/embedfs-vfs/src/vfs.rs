//! Source aggregation.
//!
//! [`Vfs`] mounts any number of sources into one tree keyed by
//! [`EntryPath`]. Entries are kept in a `BTreeMap`, so every listing comes
//! out in byte order of the normalized path.
//!
//! # Examples
//!
//! ```no_run
//! use embedfs_vfs::Vfs;
//!
//! let mut vfs = Vfs::new();
//! vfs.add_source("assets", false)?;
//! vfs.add_source("vendor/fonts.zip", false)?;
//!
//! for path in vfs.list_matches(Some(r"\.css$"), None, false)? {
//!     println!("{path}");
//! }
//! # Ok::<(), embedfs_core::Error>(())
//! ```

use crate::entry::{Entry, Locator, SourceId};
use crate::matcher::PathMatcher;
use crate::path::EntryPath;
use crate::sources::{self, ArchiveFormat, Source};
use embedfs_core::{Error, Result};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The aggregated tree of all mounted sources.
///
/// When two sources register the same path, the first registration wins
/// and the later one is logged and dropped. Directories that a source never
/// listed but whose descendants it did are synthesized with size 0 and a
/// zero timestamp.
#[derive(Debug, Default)]
pub struct Vfs {
    sources: Vec<Box<dyn Source>>,
    entries: BTreeMap<EntryPath, Entry>,
}

impl Vfs {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a host file, directory, or archive.
    ///
    /// Plain files appear at the root under their file name, directory
    /// contents are keyed relative to the directory, and archive members
    /// are flattened into the root. With `recursive`, archives found inside
    /// a directory are expanded in place: the archive path becomes a
    /// directory holding the members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] naming the path if it is missing
    /// or cannot be read.
    pub fn add_source(&mut self, path: impl AsRef<Path>, recursive: bool) -> Result<()> {
        let source = sources::open_source(path.as_ref())?;
        self.mount(source, recursive)
    }

    /// Mounts several sources in order.
    ///
    /// # Errors
    ///
    /// Stops at the first source that fails; see [`Vfs::add_source`].
    pub fn add_sources<I, P>(&mut self, recursive: bool, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.add_source(path, recursive)?;
        }
        Ok(())
    }

    /// Mounts an already constructed source.
    ///
    /// # Errors
    ///
    /// Returns whatever the source reports while scanning.
    pub fn mount(&mut self, source: Box<dyn Source>, recursive: bool) -> Result<()> {
        let id = SourceId(self.sources.len());
        let entries = source.scan(id)?;
        debug!(
            source = %source.origin().display(),
            entries = entries.len(),
            "scanned source"
        );
        self.sources.push(source);

        let mut nested: Vec<(EntryPath, PathBuf, ArchiveFormat)> = Vec::new();
        for entry in entries {
            let archive = match entry.locator() {
                Locator::Host(host) if recursive => {
                    ArchiveFormat::detect(host).map(|format| (host.clone(), format))
                }
                _ => None,
            };

            match archive {
                Some((host, format)) => {
                    let mount = entry.path().clone();
                    if self.insert(entry.into_directory()) {
                        nested.push((mount, host, format));
                    }
                }
                None => {
                    self.insert(entry);
                }
            }
        }

        for (mount, host, format) in nested {
            debug!(archive = %host.display(), mount = %mount, "expanding nested archive");
            self.mount(format.source(host, Some(mount)), false)?;
        }

        Ok(())
    }

    /// Registers one entry; returns `false` if it was dropped.
    fn insert(&mut self, entry: Entry) -> bool {
        let mut missing = Vec::new();
        for ancestor in entry.path().ancestors() {
            match self.entries.get(&ancestor) {
                Some(existing) if existing.is_dir() => {}
                Some(existing) => {
                    warn!(
                        path = %entry.path(),
                        file = %existing.path(),
                        "skipping entry below a file"
                    );
                    return false;
                }
                None => missing.push(ancestor),
            }
        }

        if let Some(existing) = self.entries.get(entry.path())
            && !(existing.is_synthetic() && entry.is_dir())
        {
            warn!(
                path = %entry.path(),
                kept = existing.source().index(),
                dropped = entry.source().index(),
                "duplicate path, keeping first registration"
            );
            return false;
        }

        for ancestor in missing {
            let synthetic = Entry::synthetic(ancestor.clone(), entry.source());
            self.entries.insert(ancestor, synthetic);
        }
        self.entries.insert(entry.path().clone(), entry);
        true
    }

    /// Lists matching paths in ascending order.
    ///
    /// With `directories_only` only directories are considered; otherwise
    /// files and directories both are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PatternInvalid`] if a pattern does not compile.
    pub fn list_matches(
        &self,
        include: Option<&str>,
        exclude: Option<&str>,
        directories_only: bool,
    ) -> Result<Vec<String>> {
        let matcher = PathMatcher::new(include, exclude)?;
        Ok(self.matches(&matcher, directories_only))
    }

    /// Lists paths accepted by a compiled matcher, in ascending order.
    #[must_use]
    pub fn matches(&self, matcher: &PathMatcher, directories_only: bool) -> Vec<String> {
        self.matching_entries(matcher, directories_only)
            .map(|entry| entry.path().to_string())
            .collect()
    }

    /// Entries accepted by a compiled matcher, in ascending path order.
    pub fn matching_entries<'a>(
        &'a self,
        matcher: &'a PathMatcher,
        directories_only: bool,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .values()
            .filter(move |entry| !directories_only || entry.is_dir())
            .filter(move |entry| matcher.matches(entry.path().as_str()))
    }

    /// Looks up a registered entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no source registered `path`, or
    /// [`Error::InvalidPath`] if it cannot be normalized.
    pub fn find(&self, path: &str) -> Result<&Entry> {
        let key = EntryPath::new(path)?;
        self.entries.get(&key).ok_or_else(|| Error::NotFound {
            path: path.to_string(),
        })
    }

    /// Opens a file entry for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for directories and
    /// [`Error::SourceUnreadable`] if the backing source fails.
    pub fn read(&self, entry: &Entry) -> Result<Box<dyn Read>> {
        if entry.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "{} is a directory",
                entry.path()
            )));
        }
        let source = self
            .sources
            .get(entry.source().index())
            .ok_or_else(|| Error::NotFound {
                path: entry.path().to_string(),
            })?;
        source.open(entry)
    }

    /// Reads the whole content of a file entry.
    ///
    /// # Errors
    ///
    /// See [`Vfs::read`].
    pub fn read_to_vec(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut reader = self.read(entry)?;
        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        reader.read_to_end(&mut bytes).map_err(|e| Error::SourceUnreadable {
            path: entry.path().to_string(),
            source: e,
        })?;
        Ok(bytes)
    }

    /// All entries in ascending path order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Number of registered entries, synthesized directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Host paths of the mounted sources, in mount order.
    pub fn source_origins(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(|source| source.origin())
    }
}
