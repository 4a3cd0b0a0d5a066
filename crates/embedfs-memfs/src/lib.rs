//! Sealed in-memory filesystem snapshots.
//!
//! This is the runtime half of embedfs. Code generated by `embedfs generate`
//! declares one byte-string constant per embedded file and a builder function
//! that rebuilds a [`MemFs`] from those constants, then seals it. Programs
//! read their assets through the sealed snapshot without touching the
//! original sources.
//!
//! # Features
//!
//! - **Arena tree**: nodes live in one vector and refer to their parent by
//!   [`NodeId`]; lookup is by normalized path
//! - **Implicit ancestors**: missing parent directories are created once, on
//!   first reference, with size 0 and [`ModTime::ZERO`]
//! - **Seal-once**: after [`MemFs::seal`] every insertion fails with
//!   [`MemFsError::Sealed`]
//! - **Zero-copy**: file data is a `Cow<'static, [u8]>`, so generated
//!   constants are borrowed, never copied
//!
//! # Examples
//!
//! ```
//! use embedfs_memfs::{MemFs, ModTime};
//!
//! const HELLO: &[u8] = b"\x68\x69";
//!
//! let mut fs = MemFs::new();
//! fs.add_dir(fs.lookup(""), "static", ModTime::ZERO)?;
//! fs.add_file(fs.lookup("static"), "static/hello.txt", 2, ModTime::new(1_600_000_000, 0), HELLO)?;
//! fs.seal();
//!
//! assert_eq!(fs.read("static/hello.txt")?, b"hi");
//! assert!(fs.get("static").unwrap().is_dir());
//! assert!(fs.add_dir(None, "late", ModTime::ZERO).unwrap_err().is_sealed());
//! # Ok::<(), embedfs_memfs::MemFsError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod memfs;
mod node;
mod time;

pub use error::{MemFsError, Result};
pub use memfs::{MemFs, Walk};
pub use node::{Node, NodeId};
pub use time::ModTime;
