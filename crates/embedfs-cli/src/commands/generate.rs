//! `embedfs generate`: encode the selected files as a Rust module.
//!
//! The pipeline is aggregate, select, collect, verify, render, write. The
//! collected snapshot is replayed into a [`MemFs`](embedfs_memfs::MemFs)
//! before rendering, so a tree the generated builder would reject never
//! reaches the output.

use anyhow::{Context, Result};
use embedfs_codegen::{EmitOptions, Emitter, Snapshot};
use embedfs_core::GeneratorConfig;
use embedfs_core::cli::ExitCode;
use tracing::{info, warn};

use super::load_selection;
use crate::cli::GenerateArgs;
use crate::output::write_output;

/// Aggregates, selects, and renders the module source for `args`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be
/// read, or the module fails to render.
pub fn render(config: &GeneratorConfig, args: &GenerateArgs) -> Result<String> {
    config.validate()?;
    let (vfs, matcher) = load_selection(config, &args.selection.inputs)?;

    let paths = vfs.matches(&matcher, false);
    if paths.is_empty() {
        warn!("no paths selected; the generated module will be empty");
    }

    let snapshot = Snapshot::collect(&vfs, &paths).context("failed to read selected files")?;
    let fs = snapshot.replay()?;
    info!(
        files = fs.file_count(),
        directories = fs.dir_count(),
        bytes = snapshot.total_bytes(),
        "collected snapshot"
    );

    let emitter = Emitter::new(EmitOptions::from(config))?;
    Ok(emitter.render(&snapshot)?)
}

/// Runs the generate command.
///
/// # Errors
///
/// See [`render`]; additionally fails if the output cannot be written.
pub fn run(config: &GeneratorConfig, args: &GenerateArgs) -> Result<ExitCode> {
    let source = render(config, args)?;
    write_output(args.out.as_deref(), &source)?;

    if let Some(out) = &args.out {
        info!(path = %out.display(), bytes = source.len(), "wrote module");
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn generate_args(argv: &[&str]) -> (GeneratorConfig, GenerateArgs) {
        let cli = Cli::parse_from(argv);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let mut config = GeneratorConfig::default();
        config.apply(args.layer());
        (config, args)
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.bin"), [0, 255]).unwrap();
        dir
    }

    #[test]
    fn test_render_uses_options() {
        let dir = fixture();
        let root = dir.path().to_str().unwrap();
        let (config, args) = generate_args(&[
            "embedfs", "generate", "--prefix", "web", "--module", "site", root,
        ]);

        let source = render(&config, &args).unwrap();
        assert!(source.contains("pub mod site {"));
        assert!(source.contains("pub fn web_fs()"));
        assert!(source.contains(r#"const WEB_612E747874: &[u8] = b"\x68\x69";"#));
        assert!(source.contains(r#"b"\x00\xff""#));
    }

    #[test]
    fn test_render_selection() {
        let dir = fixture();
        let root = dir.path().to_str().unwrap();
        let (config, args) = generate_args(&["embedfs", "generate", "--match", "bin$", root]);

        let source = render(&config, &args).unwrap();
        assert_eq!(source.matches(": &[u8] = b\"").count(), 1);
        assert!(source.contains("\"sub/b.bin\""));
        assert!(!source.contains("\"a.txt\""));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let dir = fixture();
        let root = dir.path().to_str().unwrap();
        let (config, args) = generate_args(&["embedfs", "generate", "--prefix", "9lives", root]);

        let err = render(&config, &args).unwrap_err();
        let core = err.downcast_ref::<embedfs_core::Error>().unwrap();
        assert!(core.is_config_error());
    }

    #[test]
    fn test_run_writes_file() {
        let dir = fixture();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("assets.rs");
        let (config, args) = generate_args(&[
            "embedfs",
            "generate",
            "-o",
            out.to_str().unwrap(),
            dir.path().to_str().unwrap(),
        ]);

        let code = run(&config, &args).unwrap();
        assert!(code.is_success());
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("// Code generated by"));
    }
}
