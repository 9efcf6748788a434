//! eli5 CLI entry point
//!
//! Parses arguments, dispatches to a command, prints any error to stderr and
//! exits non-zero on failure. Configuration and boot live in the CLI module.

use eli5::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
