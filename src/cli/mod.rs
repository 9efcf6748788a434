//! CLI module for eli5
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Boot the workflow and serve the web form
//! - explain: One-shot explanation printed as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_workflow, explain, init, resolve_sink, run, run_command, serve};
pub use config::{CompletionConfig, Config, SinkConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
