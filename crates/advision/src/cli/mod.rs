//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the advision binary.

mod commands;
mod generate;
mod interactive;

pub use commands::{BriefArgs, Cli, Commands, OutputFormat};
pub use generate::{run_generate, run_script};
