//! CLI module for bookstore
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - routes: Print the route table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{resolve_config, routes, run, run_command, serve};
pub use errors::{CliError, CliResult};
