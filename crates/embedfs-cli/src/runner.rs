//! Command execution and runtime logic.
//!
//! Contains the main command execution loop and logging initialization.

use anyhow::Result;
use embedfs_core::GeneratorConfig;
use embedfs_core::cli::{ExitCode, OutputFormat};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on verbosity flag.
/// Logs go to stderr so generated source on stdout stays clean.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Executes the parsed command line.
///
/// Parses the output format, resolves configuration, and routes the
/// subcommand to its handler.
///
/// # Errors
///
/// Returns an error if the format is unknown, configuration cannot be
/// loaded, or the command fails.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let output_format: OutputFormat = cli.format.parse()?;

    match cli.command {
        Commands::List(args) => {
            let mut config = GeneratorConfig::load(cli.config.as_deref())?;
            config.apply(args.selection.layer());
            debug!(?config, "resolved configuration");
            commands::list::run(&config, &args, output_format)
        }
        Commands::Generate(args) => {
            let mut config = GeneratorConfig::load(cli.config.as_deref())?;
            config.apply(args.layer());
            debug!(?config, "resolved configuration");
            commands::generate::run(&config, &args)
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Maps a failed run to its process exit code.
///
/// Walks the error chain for an [`embedfs_core::Error`]; anything else is a
/// general failure.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<embedfs_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::from)
}
