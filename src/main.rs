//! bookstore CLI entry point
//!
//! Delegates to the CLI module, prints errors to stderr and exits with
//! non-zero status on failure.

use bookstore::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
