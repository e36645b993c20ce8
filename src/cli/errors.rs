//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use thiserror::Error;

use crate::http_server::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
