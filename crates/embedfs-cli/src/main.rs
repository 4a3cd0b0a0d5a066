//! embedfs command-line tool.
//!
//! Aggregates files, directories, and archives into one tree and writes a
//! Rust module that rebuilds a selection of it as a sealed in-memory
//! filesystem.
//!
//! # Examples
//!
//! ```bash
//! # Preview the selection
//! embedfs list --match '\.(css|js)$' static/
//!
//! # Generate src/assets.rs
//! embedfs generate -o src/assets.rs --prefix web static/ vendor/icons.zip
//! ```

use clap::Parser;
use colored::Colorize;
use embedfs_cli::{Cli, execute, exit_code_for, init_logging};

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }

    let code = match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(code.as_i32());
}
