//! # Explanation Workflow
//!
//! validate -> build prompt -> complete -> log (best effort)
//!
//! The completion call is never retried and has no fallback text. The log
//! row is attempted only after a successful completion, and whatever happens
//! to it is folded into [`Explanation::log`]; it never replaces or removes
//! the explanation.

use std::sync::Arc;

use uuid::Uuid;

use crate::completion::{CompletionClient, CompletionRequest, CompletionResult, DEFAULT_MODEL};
use crate::levels::{self, LevelDefinition};
use crate::observability::{log_event_with_fields, Event};
use crate::sink::{LogEntry, LogStatus, SinkHandle, SinkResult};

use super::errors::{ExplainResult, ValidationError};

/// Reject input that is empty after trimming.
///
/// Callers run this before [`ExplainWorkflow::explain`]; the workflow itself
/// sends whatever it is given.
pub fn validate_input(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        log_event_with_fields(Event::InputRejected, &[("reason", "empty_input")]);
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}

/// A produced explanation and the fate of its log row
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Correlates the log events of one request
    pub request_id: Uuid,

    /// Completion text, trimmed
    pub text: String,

    pub level: &'static LevelDefinition,

    /// The row that was offered to the sink
    pub entry: LogEntry,

    pub log: LogStatus,
}

/// The explanation workflow and its collaborators
pub struct ExplainWorkflow {
    client: Arc<dyn CompletionClient>,
    sink: Arc<SinkHandle>,
    model: String,
}

impl std::fmt::Debug for ExplainWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainWorkflow")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .field("sink", &self.sink)
            .finish()
    }
}

impl ExplainWorkflow {
    pub fn new(client: Arc<dyn CompletionClient>, sink: Arc<SinkHandle>) -> Self {
        Self::with_model(client, sink, DEFAULT_MODEL)
    }

    pub fn with_model(
        client: Arc<dyn CompletionClient>,
        sink: Arc<SinkHandle>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            sink,
            model: model.into(),
        }
    }

    /// The sink handle this workflow logs to
    pub fn sink(&self) -> &SinkHandle {
        &self.sink
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the completion request for `text` at level `rank`
    pub fn build_request(
        &self,
        text: &str,
        rank: i64,
    ) -> ExplainResult<(&'static LevelDefinition, CompletionRequest)> {
        let level = levels::lookup(rank)?;
        let prompt = levels::build_prompt(level, text);
        Ok((level, CompletionRequest::new(self.model.clone(), prompt)))
    }

    /// Send a request and trim the answer
    pub async fn request_completion(&self, request: &CompletionRequest) -> CompletionResult<String> {
        let text = self.client.complete(request).await?;
        Ok(text.trim().to_string())
    }

    /// Explain `text` at level `rank`, then log the interaction
    pub async fn explain(&self, text: &str, rank: i64) -> ExplainResult<Explanation> {
        let request_id = Uuid::new_v4();
        let rid = request_id.to_string();
        let rid = rid.as_str();
        let (level, request) = self.build_request(text, rank)?;

        let rank_str = level.rank.to_string();
        let chars_in = text.chars().count().to_string();
        log_event_with_fields(
            Event::ExplainStart,
            &[
                ("request_id", rid),
                ("level", rank_str.as_str()),
                ("input_chars", chars_in.as_str()),
                ("provider", self.client.provider_name()),
                ("model", self.model.as_str()),
            ],
        );

        let answer = match self.request_completion(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::ExplainFailed,
                    &[("request_id", rid), ("kind", e.kind()), ("error", message.as_str())],
                );
                return Err(e.into());
            }
        };

        let chars_out = answer.chars().count().to_string();
        log_event_with_fields(
            Event::ExplainComplete,
            &[("request_id", rid), ("output_chars", chars_out.as_str())],
        );

        let entry = LogEntry::new(level.label, text);
        let log = self.sink.record(&entry).await;
        report_log_status(rid, &log);

        Ok(Explanation {
            request_id,
            text: answer,
            level,
            entry,
            log,
        })
    }

    /// Append the synthetic test row to the remote sink
    pub async fn test_logging(&self) -> SinkResult<()> {
        let result = self.sink.append_test_row().await;
        match result {
            Ok(()) => {
                let sink = self.sink.describe();
                log_event_with_fields(Event::TestLogAppended, &[("sink", sink.as_str())]);
            }
            Err(ref e) => {
                let error = e.to_string();
                log_event_with_fields(Event::TestLogFailed, &[("error", error.as_str())]);
            }
        }
        result
    }
}

fn report_log_status(rid: &str, status: &LogStatus) {
    match status {
        LogStatus::Logged { sink } => {
            log_event_with_fields(Event::LogAppended, &[("request_id", rid), ("sink", *sink)])
        }
        LogStatus::Failed { sink, error } => log_event_with_fields(
            Event::LogFailed,
            &[("request_id", rid), ("sink", *sink), ("error", error.as_str())],
        ),
        LogStatus::Skipped { .. } => {
            log_event_with_fields(Event::LogSkipped, &[("request_id", rid), ("reason", "unavailable")])
        }
        LogStatus::Disabled => {}
    }
}
