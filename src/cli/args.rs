//! CLI argument definitions using clap
//!
//! Commands:
//! - eli5 init --config <path>
//! - eli5 serve --config <path> [--port <port>]
//! - eli5 explain --config <path> --level <n> <text>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Explain Like I'm 5 - simplify complicated text for any reading level
#[derive(Parser, Debug)]
#[command(name = "eli5")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./eli5.json")]
        config: PathBuf,
    },

    /// Run the web form server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./eli5.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Explain one text and exit
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./eli5.json")]
        config: PathBuf,

        /// Understanding level, 1 (I'm 5) to 5 (Intern)
        #[arg(long, default_value_t = 1)]
        level: i64,

        /// Text to simplify
        text: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_args() {
        let cli = Cli::try_parse_from(["eli5", "explain", "--level", "3", "Why is the sky blue?"]).unwrap();
        match cli.command {
            Command::Explain { config, level, text } => {
                assert_eq!(config, PathBuf::from("./eli5.json"));
                assert_eq!(level, 3);
                assert_eq!(text, "Why is the sky blue?");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::try_parse_from(["eli5", "serve", "--config", "a.json", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("a.json"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
