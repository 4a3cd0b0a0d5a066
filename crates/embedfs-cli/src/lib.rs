//! embedfs CLI library.
//!
//! This library provides the core functionality for the `embedfs` tool,
//! exposing the argument surface, commands, and formatters so they can be
//! tested without spawning the binary.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)] // every command returns Result<ExitCode>

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod output;
pub mod runner;

pub use cli::{Cli, Commands};
pub use runner::{execute, exit_code_for, init_logging};
