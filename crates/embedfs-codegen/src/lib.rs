//! Snapshot encoding for embedfs.
//!
//! Turns a selection of a [`Vfs`](embedfs_vfs::Vfs) into Rust source that
//! rebuilds the same tree at run time with `embedfs-memfs`.
//!
//! # Architecture
//!
//! - [`escape`]: fixed-width `\xNN` byte escaping and constant naming
//! - [`Snapshot`]: the selected entries read into memory
//! - [`SnapshotPlan`]: insertion order with every ancestor created once
//! - [`Emitter`]: renders the module through a Handlebars template
//!
//! [`Snapshot::replay`] runs the same plan in-process, which validates the
//! tree before anything is written.
//!
//! # Examples
//!
//! ```
//! use embedfs_codegen::{EmitOptions, Emitter, Snapshot};
//! use embedfs_vfs::Vfs;
//!
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("a.txt"), "hi")?;
//!
//! let mut vfs = Vfs::new();
//! vfs.add_source(dir.path(), false)?;
//!
//! let snapshot = Snapshot::collect(&vfs, &vfs.list_matches(None, None, false)?)?;
//! snapshot.replay()?;
//!
//! let source = Emitter::new(EmitOptions::default())?.render(&snapshot)?;
//! assert!(source.contains("pub mod embedded {"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod emitter;
mod plan;
mod snapshot;

pub mod escape;
pub mod template_engine;

pub use emitter::{EmitOptions, Emitter};
pub use plan::{BuildStep, SnapshotPlan};
pub use snapshot::{Snapshot, SnapshotItem};
