//! CLI command implementations

use std::io::{self, Write};

use tracing::info;

use crate::http_server::{config::PORT_ENV, HttpServer, HttpServerConfig, BOOK_ROUTES};
use crate::logging;

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Routes => routes(&mut io::stdout()),
    }
}

/// Merge defaults, config file, `PORT` and flags, in that order
pub fn resolve_config(args: &ServeArgs, port_env: Option<&str>) -> CliResult<HttpServerConfig> {
    let mut config = match &args.config {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    config.apply_port_env(port_env)?;

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Start the HTTP server with a freshly seeded store
///
/// Blocks until Ctrl-C.
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let port_env = std::env::var(PORT_ENV).ok();
    let config = resolve_config(args, port_env.as_deref())?;

    logging::init(&config.log_level)?;
    info!(addr = %config.socket_addr(), "configuration resolved");

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Server(format!("HTTP server failed: {}", e)))
    })
}

/// Write the route table, one `METHOD path` per line
pub fn routes<W: Write>(out: &mut W) -> CliResult<()> {
    for (method, path) in BOOK_ROUTES {
        writeln!(out, "{:<7} {}", method, path)?;
    }
    out.flush()?;
    Ok(())
}
