//! Rendering snapshots as Rust source.
//!
//! The emitted module declares one byte-string constant per file, in
//! ascending path order, followed by a builder function that recreates the
//! tree in a fresh `MemFs` and seals it:
//!
//! ```text
//! pub mod embedded {
//!     use embedfs_memfs::{MemFs, MemFsError, ModTime};
//!
//!     // "a.txt"
//!     const EMBED_612E747874: &[u8] = b"\x68\x69";
//!
//!     pub fn embed_fs() -> Result<MemFs, MemFsError> {
//!         let mut fs = MemFs::new();
//!         fs.add_file(fs.lookup(""), "a.txt", 2, ModTime::new(1700000000, 0), EMBED_612E747874)?;
//!         fs.seal();
//!         Ok(fs)
//!     }
//! }
//! ```

use crate::escape::{constant_name, escape};
use crate::plan::BuildStep;
use crate::snapshot::Snapshot;
use crate::template_engine::{SNAPSHOT_TEMPLATE, TemplateEngine};
use embedfs_core::{Error, GeneratorConfig, Result};
use embedfs_memfs::ModTime;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Names used in the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Prefix of constant names and of the `<prefix>_fs` builder
    pub prefix: String,
    /// Name of the generated module
    pub module: String,
    /// Path of the crate providing `MemFs`
    pub runtime_crate: String,
    /// Optional `cfg` predicate on the module
    pub cfg: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for EmitOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            module: config.module.clone(),
            runtime_crate: config.runtime_crate.clone(),
            cfg: config.cfg.clone(),
        }
    }
}

impl EmitOptions {
    /// Name of the generated builder function.
    #[must_use]
    pub fn builder_fn(&self) -> String {
        format!("{}_fs", self.prefix.to_lowercase())
    }
}

#[derive(Serialize)]
struct ModuleContext<'a> {
    generator: &'static str,
    file_count: usize,
    dir_count: usize,
    total_bytes: usize,
    cfg: Option<&'a str>,
    module: &'a str,
    runtime_crate: &'a str,
    builder_fn: String,
    constants: Vec<ConstantContext>,
    steps: Vec<StepContext>,
}

#[derive(Serialize)]
struct ConstantContext {
    path: String,
    name: String,
    literal: String,
}

#[derive(Serialize)]
struct StepContext {
    is_dir: bool,
    path: String,
    parent: String,
    size: u64,
    mod_time: String,
    constant: Option<String>,
}

/// Renders [`Snapshot`]s through the snapshot template.
///
/// # Examples
///
/// ```
/// use embedfs_codegen::{EmitOptions, Emitter, Snapshot, SnapshotItem};
/// use embedfs_memfs::ModTime;
/// use embedfs_vfs::EntryPath;
///
/// let snapshot = Snapshot::from_items(vec![
///     SnapshotItem::file(EntryPath::new("a.txt")?, ModTime::ZERO, b"hi".to_vec()),
/// ])?;
///
/// let source = Emitter::new(EmitOptions::default())?.render(&snapshot)?;
/// assert!(source.contains(r#"const EMBED_612E747874: &[u8] = b"\x68\x69";"#));
/// assert!(source.contains("pub fn embed_fs() -> Result<MemFs, MemFsError>"));
/// # Ok::<(), embedfs_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Emitter<'a> {
    options: EmitOptions,
    engine: TemplateEngine<'a>,
}

impl Emitter<'_> {
    /// Creates an emitter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if the built-in template cannot be
    /// registered.
    pub fn new(options: EmitOptions) -> Result<Self> {
        Ok(Self {
            options,
            engine: TemplateEngine::new()?,
        })
    }

    /// The options this emitter renders with.
    #[must_use]
    pub const fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Renders the snapshot module as a string.
    ///
    /// Identical snapshots always render to identical text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if rendering fails.
    pub fn render(&self, snapshot: &Snapshot) -> Result<String> {
        let plan = snapshot.plan();
        let items = snapshot.items();

        let constants: Vec<ConstantContext> = items
            .iter()
            .filter_map(|item| {
                item.content().map(|content| ConstantContext {
                    path: format!("{:?}", item.path().as_str()),
                    name: constant_name(&self.options.prefix, item.path().as_str()),
                    literal: escape(content),
                })
            })
            .collect();

        let steps = plan
            .steps()
            .iter()
            .map(|step| match step {
                BuildStep::Dir {
                    path,
                    parent,
                    mod_time,
                    ..
                } => StepContext {
                    is_dir: true,
                    path: format!("{path:?}"),
                    parent: format!("{parent:?}"),
                    size: 0,
                    mod_time: mod_time_expr(*mod_time),
                    constant: None,
                },
                BuildStep::File {
                    path,
                    parent,
                    size,
                    mod_time,
                    ..
                } => StepContext {
                    is_dir: false,
                    path: format!("{path:?}"),
                    parent: format!("{parent:?}"),
                    size: *size,
                    mod_time: mod_time_expr(*mod_time),
                    constant: Some(constant_name(&self.options.prefix, path)),
                },
            })
            .collect();

        let context = ModuleContext {
            generator: "embedfs",
            file_count: plan.file_count(),
            dir_count: plan.dir_count(),
            total_bytes: snapshot.total_bytes(),
            cfg: self.options.cfg.as_deref(),
            module: &self.options.module,
            runtime_crate: &self.options.runtime_crate,
            builder_fn: self.options.builder_fn(),
            constants,
            steps,
        };

        let source = self.engine.render(SNAPSHOT_TEMPLATE, &context)?;
        debug!(
            files = context.file_count,
            dirs = context.dir_count,
            bytes = source.len(),
            "rendered snapshot module"
        );
        Ok(source)
    }

    /// Renders the snapshot module into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailed`] if rendering fails and
    /// [`Error::OutputUnwritable`] if writing fails.
    pub fn emit<W: Write>(&self, snapshot: &Snapshot, mut out: W) -> Result<()> {
        let source = self.render(snapshot)?;
        out.write_all(source.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| Error::OutputUnwritable {
                path: "<stream>".to_string(),
                source: e,
            })
    }
}

fn mod_time_expr(mod_time: ModTime) -> String {
    if mod_time.is_zero() {
        "ModTime::ZERO".to_string()
    } else {
        format!("ModTime::new({}, {})", mod_time.secs(), mod_time.nanos())
    }
}
