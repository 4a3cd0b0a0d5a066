//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use embedfs_core::ConfigLayer;
use std::path::PathBuf;

/// embedfs - embed files, directories, and archives into Rust programs.
///
/// Collects input sources into one tree, selects paths by pattern, and
/// writes a Rust module that rebuilds the selection as a sealed in-memory
/// filesystem.
#[derive(Parser, Debug)]
#[command(name = "embedfs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for listings (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Configuration file to use instead of ./embedfs.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the paths a generation run would select.
    ///
    /// # Examples
    ///
    /// ```bash
    /// embedfs list --match '\.css$' assets/
    /// embedfs --format json list --dirs-only assets/ vendor/fonts.zip
    /// ```
    List(ListArgs),

    /// Generate a Rust module embedding the selected files.
    ///
    /// # Examples
    ///
    /// ```bash
    /// embedfs generate -o src/assets.rs --prefix web --module assets static/
    /// embedfs generate --recursive --not-match '\.map$' dist/ > src/dist.rs
    /// ```
    Generate(GenerateArgs),

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Inputs and selection shared by `list` and `generate`.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Files, directories, or archives (.zip, .jar, .tar) to read
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Only select paths matching this regular expression
    #[arg(long = "match", value_name = "REGEX")]
    pub include: Option<String>,

    /// Skip paths matching this regular expression
    #[arg(long = "not-match", value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Expand archives found inside input directories
    #[arg(short, long)]
    pub recursive: bool,
}

impl SelectionArgs {
    /// Settings given on the command line, as the top configuration layer.
    #[must_use]
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            recursive: self.recursive.then_some(true),
            ..ConfigLayer::default()
        }
    }
}

/// Arguments of `embedfs list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Inputs and selection
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// List directories only
    #[arg(long)]
    pub dirs_only: bool,
}

/// Arguments of `embedfs generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Inputs and selection
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Write the module to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Prefix for constant names and the builder function
    #[arg(long)]
    pub prefix: Option<String>,

    /// Name of the generated module
    #[arg(long)]
    pub module: Option<String>,

    /// Path of the crate providing MemFs in generated code
    #[arg(long, value_name = "PATH")]
    pub runtime_crate: Option<String>,

    /// cfg predicate placed on the generated module
    #[arg(long, value_name = "PREDICATE")]
    pub cfg: Option<String>,
}

impl GenerateArgs {
    /// Settings given on the command line, as the top configuration layer.
    #[must_use]
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            prefix: self.prefix.clone(),
            module: self.module.clone(),
            runtime_crate: self.runtime_crate.clone(),
            cfg: self.cfg.clone(),
            ..self.selection.layer()
        }
    }
}
