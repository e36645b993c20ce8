//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after configuration is resolved.

use tracing_subscriber::EnvFilter;

use crate::cli::CliError;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` is the fallback filter when it is
/// unset or invalid.
pub fn init(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| CliError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}
