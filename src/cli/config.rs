//! Configuration file
//!
//! ```json
//! {
//!   "server": { "host": "127.0.0.1", "port": 8501, "cors_origins": [] },
//!   "completion": {
//!     "api_url": "https://api.openai.com/v1/chat/completions",
//!     "model": "gpt-3.5-turbo",
//!     "api_key_env": "OPENAI_API_KEY",
//!     "timeout_secs": null
//!   },
//!   "sink": { "kind": "file", "path": "explain_log.csv" }
//! }
//! ```
//!
//! Every section may be omitted. The API key itself never lives in the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::completion::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Whole-process configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub sink: SinkConfig,
}

/// Completion service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout; `null` waits as long as the transport allows
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_log_path() -> PathBuf {
    PathBuf::from("explain_log.csv")
}
fn default_range() -> String {
    "A1".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

impl CompletionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Log sink selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    /// Local CSV file
    File {
        #[serde(default = "default_log_path")]
        path: PathBuf,
    },

    /// Remote spreadsheet via a service account
    Sheets {
        service_account_path: PathBuf,
        spreadsheet_id: String,
        #[serde(default = "default_range")]
        range: String,
    },

    /// No logging
    None,
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig::File {
            path: default_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::not_initialized(path));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values no deployment could run with
    pub fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        if self.completion.api_url.trim().is_empty() {
            return Err(CliError::config_error("completion.api_url must not be empty"));
        }

        if self.completion.model.trim().is_empty() {
            return Err(CliError::config_error("completion.model must not be empty"));
        }

        if self.completion.api_key_env.trim().is_empty() {
            return Err(CliError::config_error(
                "completion.api_key_env must name an environment variable",
            ));
        }

        if self.completion.timeout_secs == Some(0) {
            return Err(CliError::config_error("completion.timeout_secs must be > 0"));
        }

        match &self.sink {
            SinkConfig::File { path } if path.as_os_str().is_empty() => {
                Err(CliError::config_error("sink.path must not be empty"))
            }
            SinkConfig::Sheets { spreadsheet_id, .. } if spreadsheet_id.trim().is_empty() => {
                Err(CliError::config_error("sink.spreadsheet_id must not be empty"))
            }
            SinkConfig::Sheets { range, .. } if range.trim().is_empty() => {
                Err(CliError::config_error("sink.range must not be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> CliResult<String> {
        let name = &self.completion.api_key_env;
        match std::env::var(name) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => Err(CliError::config_error(format!(
                "Environment variable {} is empty",
                name
            ))),
            Err(_) => Err(CliError::config_error(format!(
                "Environment variable {} is not set",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
        assert_eq!(config.completion.timeout(), None);
        assert_eq!(
            config.sink,
            SinkConfig::File {
                path: PathBuf::from("explain_log.csv")
            }
        );
    }

    #[test]
    fn test_sheets_sink_defaults_range() {
        let config: Config = serde_json::from_str(
            r#"{"sink": {"kind": "sheets", "service_account_path": "sa.json", "spreadsheet_id": "abc"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.sink,
            SinkConfig::Sheets {
                service_account_path: PathBuf::from("sa.json"),
                spreadsheet_id: "abc".to_string(),
                range: "A1".to_string(),
            }
        );
    }

    #[test]
    fn test_none_sink() {
        let config: Config = serde_json::from_str(r#"{"sink": {"kind": "none"}}"#).unwrap();
        assert_eq!(config.sink, SinkConfig::None);
    }

    #[test]
    fn test_unknown_sink_kind_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"sink": {"kind": "s3"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.completion.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.completion.timeout_secs = Some(30);
        assert!(config.validate().is_ok());
        assert_eq!(config.completion.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_rejects_empty_spreadsheet_id() {
        let config = Config {
            sink: SinkConfig::Sheets {
                service_account_path: PathBuf::from("sa.json"),
                spreadsheet_id: " ".to_string(),
                range: "A1".to_string(),
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("spreadsheet_id"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code_str(), "ELI5_CLI_NOT_INITIALIZED");
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("eli5.json");
        fs::write(&path, "{not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "ELI5_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_api_key_from_env() {
        let mut config = Config::default();
        config.completion.api_key_env = "ELI5_TEST_CONFIG_API_KEY".to_string();

        std::env::remove_var("ELI5_TEST_CONFIG_API_KEY");
        assert!(config.api_key().is_err());

        std::env::set_var("ELI5_TEST_CONFIG_API_KEY", "sk-test");
        assert_eq!(config.api_key().unwrap(), "sk-test");
        std::env::remove_var("ELI5_TEST_CONFIG_API_KEY");
    }
}
