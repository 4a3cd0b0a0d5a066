//! Source aggregation and path selection for embedfs.
//!
//! Host files, directory trees, and archives (zip, jar, tar) are mounted
//! into a single [`Vfs`] addressed by normalized [`EntryPath`]s. A
//! [`PathMatcher`] selects the subset that ends up in a snapshot.
//!
//! # Examples
//!
//! ```
//! use embedfs_vfs::Vfs;
//! use std::fs;
//!
//! let dir = tempfile::tempdir()?;
//! fs::write(dir.path().join("a.txt"), "hi")?;
//! fs::create_dir(dir.path().join("sub"))?;
//! fs::write(dir.path().join("sub/b.bin"), [0u8, 255])?;
//!
//! let mut vfs = Vfs::new();
//! vfs.add_source(dir.path(), false)?;
//!
//! assert_eq!(vfs.list_matches(None, None, false)?, ["a.txt", "sub", "sub/b.bin"]);
//!
//! let entry = vfs.find("a.txt")?;
//! assert_eq!(vfs.read_to_vec(entry)?, b"hi");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod entry;
mod path;
mod vfs;

pub mod matcher;
pub mod sources;

pub use entry::{Entry, EntryKind, Locator, SourceId};
pub use matcher::PathMatcher;
pub use path::EntryPath;
pub use sources::Source;
pub use vfs::Vfs;
