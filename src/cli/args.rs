//! CLI argument definitions using clap
//!
//! Commands:
//! - bookstore serve [--config <path>] [--host <host>] [--port <port>] [--log-level <level>]
//! - bookstore routes

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// bookstore - A minimal in-memory bookstore CRUD API
#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print the HTTP route table and exit
    Routes,
}

#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ServeArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config and PORT)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Log filter used when RUST_LOG is unset (overrides config)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
