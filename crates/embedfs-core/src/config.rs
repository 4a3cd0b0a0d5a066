//! Generator configuration.
//!
//! Settings are resolved from several layers, lowest priority first:
//! built-in defaults, the global file `<config_dir>/embedfs/config.toml`,
//! the project file `./embedfs.toml` (or an explicit `--config` file), and
//! finally command-line flags. Each layer is a [`ConfigLayer`] whose unset
//! keys leave the value below untouched.
//!
//! # Examples
//!
//! ```
//! use embedfs_core::{ConfigLayer, GeneratorConfig};
//!
//! let layer: ConfigLayer = toml::from_str(r#"prefix = "assets""#).unwrap();
//!
//! let mut config = GeneratorConfig::default();
//! config.apply(layer);
//!
//! assert_eq!(config.prefix, "assets");
//! assert_eq!(config.module, "embedded");
//! assert!(config.validate().is_ok());
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the project-local configuration file.
pub const PROJECT_CONFIG_FILE: &str = "embedfs.toml";

/// Rust keywords that cannot name a module.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Fully resolved settings for one generator run.
///
/// # Examples
///
/// ```
/// use embedfs_core::GeneratorConfig;
///
/// let config = GeneratorConfig {
///     prefix: "static_files".to_string(),
///     recursive: true,
///     ..Default::default()
/// };
///
/// assert_eq!(config.runtime_crate, "embedfs_memfs");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Prefix of constant names and of the builder function.
    ///
    /// Default: `embed`
    pub prefix: String,

    /// Name of the generated module.
    ///
    /// Default: `embedded`
    pub module: String,

    /// Path of the runtime crate the generated code imports.
    ///
    /// Default: `embedfs_memfs`
    pub runtime_crate: String,

    /// Optional `cfg` predicate placed on the generated module.
    pub cfg: Option<String>,

    /// Include pattern; absent means every path qualifies.
    pub include: Option<String>,

    /// Exclude pattern; absent means nothing is excluded.
    pub exclude: Option<String>,

    /// Expand archives found inside directory sources.
    ///
    /// Default: false
    pub recursive: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: "embed".to_string(),
            module: "embedded".to_string(),
            runtime_crate: "embedfs_memfs".to_string(),
            cfg: None,
            include: None,
            exclude: None,
            recursive: false,
        }
    }
}

impl GeneratorConfig {
    /// Overrides every value that is set in `layer`.
    pub fn apply(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            prefix,
            module,
            runtime_crate,
            cfg,
            include,
            exclude,
            recursive,
        } = layer;

        if let Some(prefix) = prefix {
            self.prefix = prefix;
        }
        if let Some(module) = module {
            self.module = module;
        }
        if let Some(runtime_crate) = runtime_crate {
            self.runtime_crate = runtime_crate;
        }
        if cfg.is_some() {
            self.cfg = cfg;
        }
        if include.is_some() {
            self.include = include;
        }
        if exclude.is_some() {
            self.exclude = exclude;
        }
        if let Some(recursive) = recursive {
            self.recursive = recursive;
        }
    }

    /// Resolves the file layers on top of the defaults.
    ///
    /// The global file is read when it exists. `explicit` replaces the
    /// project file lookup; unlike the implicit files it must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global) = global_config_path()
            && let Some(layer) = ConfigLayer::load_optional(&global)?
        {
            debug!(path = %global.display(), "applied global configuration");
            config.apply(layer);
        }

        match explicit {
            Some(path) => {
                config.apply(ConfigLayer::load(path)?);
                debug!(path = %path.display(), "applied configuration file");
            }
            None => {
                let project = Path::new(PROJECT_CONFIG_FILE);
                if let Some(layer) = ConfigLayer::load_optional(project)? {
                    debug!(path = %project.display(), "applied project configuration");
                    config.apply(layer);
                }
            }
        }

        Ok(config)
    }

    /// Checks that the names end up as valid Rust in the generated source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first offending setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig {
    ///     module: "mod".to_string(),
    ///     ..Default::default()
    /// };
    /// assert!(config.validate().unwrap_err().is_config_error());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.prefix) {
            return Err(Error::ConfigError {
                message: format!("prefix {:?} is not a valid identifier", self.prefix),
            });
        }
        if !is_identifier(&self.module) || is_keyword(&self.module) {
            return Err(Error::ConfigError {
                message: format!("module {:?} is not a valid module name", self.module),
            });
        }
        if !self
            .runtime_crate
            .split("::")
            .all(|segment| is_identifier(segment) && !is_reserved_segment(segment))
        {
            return Err(Error::ConfigError {
                message: format!(
                    "runtime crate {:?} is not a valid path",
                    self.runtime_crate
                ),
            });
        }
        if self.cfg.as_deref().is_some_and(|cfg| cfg.trim().is_empty()) {
            return Err(Error::ConfigError {
                message: "cfg predicate cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// One partial configuration layer.
///
/// Every key is optional; unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConfigLayer {
    /// See [`GeneratorConfig::prefix`].
    pub prefix: Option<String>,
    /// See [`GeneratorConfig::module`].
    pub module: Option<String>,
    /// See [`GeneratorConfig::runtime_crate`].
    pub runtime_crate: Option<String>,
    /// See [`GeneratorConfig::cfg`].
    pub cfg: Option<String>,
    /// See [`GeneratorConfig::include`].
    #[serde(alias = "match")]
    pub include: Option<String>,
    /// See [`GeneratorConfig::exclude`].
    #[serde(alias = "not-match")]
    pub exclude: Option<String>,
    /// See [`GeneratorConfig::recursive`].
    pub recursive: Option<bool>,
}

impl ConfigLayer {
    /// Parses a TOML layer from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file is missing, unreadable,
    /// or not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::parse(&text, path)
    }

    fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration in {}: {e}", origin.display()),
        })
    }
}

/// Location of the global configuration file, if the platform has one.
#[must_use]
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("embedfs").join("config.toml"))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            name != "_" && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

// `crate`, `self` and `super` are allowed as path segments.
fn is_reserved_segment(segment: &str) -> bool {
    is_keyword(segment) && !matches!(segment, "crate" | "self" | "super")
}
