//! Shared types for embedfs.
//!
//! This crate provides the pieces every other embedfs crate agrees on:
//!
//! - The error hierarchy ([`Error`], [`Result`])
//! - Command-line types ([`cli::ExitCode`], [`cli::OutputFormat`])
//! - Layered generator configuration ([`GeneratorConfig`], [`ConfigLayer`])

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;

pub mod cli;

pub use config::{ConfigLayer, GeneratorConfig, PROJECT_CONFIG_FILE, global_config_path};
pub use error::{Error, Result};
