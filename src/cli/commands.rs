//! CLI command implementations
//!
//! Boot sequence shared by `serve` and `explain`:
//! 1. Configuration load and validation
//! 2. API key lookup
//! 3. Completion client construction
//! 4. Sink resolution (a remote sink that cannot connect becomes unavailable)
//! 5. Workflow assembly

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::completion::OpenAiClient;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::sink::{FileSink, SheetTarget, SheetsSink, SinkHandle};
use crate::workflow::{validate_input, ExplainWorkflow};

use super::args::Command;
use super::config::{Config, SinkConfig};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    dotenv::dotenv().ok();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Explain {
            config,
            level,
            text,
        } => explain(&config, level, &text),
    }
}

/// Write a default configuration file
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::config_error(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
    }

    let content = serde_json::to_string_pretty(&Config::default())?;
    fs::write(config_path, content + "\n")?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
    }))?;

    Ok(())
}

/// Run the web form server until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let rt = runtime()?;
    rt.block_on(async {
        let workflow = build_workflow(&config).await?;
        HttpServer::new(config.server.clone(), workflow)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Explain one text and print the result as a JSON line
pub fn explain(config_path: &Path, level: i64, text: &str) -> CliResult<()> {
    validate_input(text).map_err(|e| CliError::invalid_input(e.to_string()))?;
    let config = load_config(config_path)?;

    let rt = runtime()?;
    let explanation = rt.block_on(async {
        let workflow = build_workflow(&config).await?;
        workflow
            .explain(text, level)
            .await
            .map_err(|e| CliError::explain_failed(e.to_string()))
    })?;

    write_response(json!({
        "request_id": explanation.request_id.to_string(),
        "explanation": explanation.text,
        "level": explanation.level.rank,
        "level_label": explanation.level.label,
        "log": explanation.log,
    }))?;

    Ok(())
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    log_event(Event::BootStart);
    let config = Config::load(config_path)?;
    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Assemble the workflow from configuration
pub async fn build_workflow(config: &Config) -> CliResult<ExplainWorkflow> {
    let api_key = config.api_key()?;
    let client = OpenAiClient::new(
        config.completion.api_url.as_str(),
        api_key,
        config.completion.timeout(),
    )
    .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let sink = resolve_sink(&config.sink).await;

    Ok(ExplainWorkflow::with_model(
        Arc::new(client),
        Arc::new(sink),
        config.completion.model.as_str(),
    ))
}

/// Turn the sink section into a handle.
///
/// Never fails: a remote sink that cannot authorize is reported once and the
/// process keeps serving without logging.
pub async fn resolve_sink(config: &SinkConfig) -> SinkHandle {
    match config {
        SinkConfig::None => {
            log_event_with_fields(Event::SinkReady, &[("sink", "disabled")]);
            SinkHandle::disabled()
        }
        SinkConfig::File { path } => {
            let display = path.display().to_string();
            log_event_with_fields(
                Event::SinkReady,
                &[("sink", "file"), ("path", display.as_str())],
            );
            SinkHandle::local(Arc::new(FileSink::new(path.clone())))
        }
        SinkConfig::Sheets {
            service_account_path,
            spreadsheet_id,
            range,
        } => {
            let target = SheetTarget {
                spreadsheet_id: spreadsheet_id.clone(),
                range: range.clone(),
            };
            match SheetsSink::connect(service_account_path, target).await {
                Ok(sink) => {
                    log_event_with_fields(
                        Event::SinkReady,
                        &[("sink", "sheets"), ("spreadsheet_id", spreadsheet_id.as_str())],
                    );
                    SinkHandle::remote(Arc::new(sink))
                }
                Err(e) => {
                    let error = e.to_string();
                    log_event_with_fields(
                        Event::SinkUnavailable,
                        &[("sink", "sheets"), ("error", error.as_str())],
                    );
                    SinkHandle::unavailable(error)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("eli5.json");

        init(&path).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("eli5.json");
        fs::write(&path, "{}").unwrap();

        let err = init(&path).unwrap_err();
        assert_eq!(err.code_str(), "ELI5_CLI_ALREADY_INITIALIZED");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_explain_rejects_empty_text_before_loading_config() {
        let err = explain(Path::new("/nonexistent/eli5.json"), 1, "   ").unwrap_err();
        assert_eq!(err.code_str(), "ELI5_CLI_INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_resolve_disabled_and_file_sinks() {
        assert_eq!(resolve_sink(&SinkConfig::None).await.describe(), "disabled");

        let temp = TempDir::new().unwrap();
        let handle = resolve_sink(&SinkConfig::File {
            path: temp.path().join("log.csv"),
        })
        .await;
        assert_eq!(handle.describe(), "file");
    }

    #[tokio::test]
    async fn test_missing_service_account_makes_sink_unavailable() {
        let handle = resolve_sink(&SinkConfig::Sheets {
            service_account_path: PathBuf::from("/nonexistent/service_account.json"),
            spreadsheet_id: "abc".to_string(),
            range: "A1".to_string(),
        })
        .await;
        assert_eq!(handle.describe(), "unavailable");
        assert!(handle.startup_warning().is_some());
    }

    #[tokio::test]
    async fn test_build_workflow_requires_api_key() {
        let mut config = Config::default();
        config.completion.api_key_env = "ELI5_TEST_MISSING_KEY".to_string();
        config.sink = SinkConfig::None;
        std::env::remove_var("ELI5_TEST_MISSING_KEY");

        let err = build_workflow(&config).await.unwrap_err();
        assert_eq!(err.code_str(), "ELI5_CLI_CONFIG_ERROR");
    }
}
