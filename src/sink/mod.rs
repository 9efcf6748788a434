//! # Log Sinks
//!
//! Append-only destinations for interaction logs.
//!
//! - [`FileSink`] - local CSV file, input truncated to 50 characters
//! - [`SheetsSink`] - remote spreadsheet, full input
//! - [`MemorySink`] - in-process, for tests
//!
//! A deployment uses at most one sink, resolved once at startup into a
//! [`SinkHandle`] that is passed to the workflow explicitly.

mod csv;
mod entry;
mod errors;
mod file;
mod memory;
mod sheets;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

pub use entry::{test_row, truncate_chars, LogEntry, FILE_INPUT_PREFIX_CHARS, TEST_ROW};
pub use errors::{SinkError, SinkResult};
pub use file::FileSink;
pub use memory::MemorySink;
pub use sheets::{ServiceAccountKey, SheetTarget, SheetsSink, SCOPES};

/// Append-only log destination
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Append one entry
    async fn append(&self, entry: &LogEntry) -> SinkResult<()>;

    /// Short sink name for logs and the status line
    fn name(&self) -> &'static str;

    /// The row this sink writes for `entry`
    fn row(&self, entry: &LogEntry) -> Vec<String> {
        entry.remote_row()
    }
}

/// A sink that also accepts arbitrary rows (manual test logging)
#[async_trait]
pub trait RowSink: LogSink {
    /// Append a raw row
    async fn append_row(&self, row: &[String]) -> SinkResult<()>;
}

/// What happened to the log row of one explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogStatus {
    /// Row appended
    Logged { sink: &'static str },

    /// Append failed; the explanation stands
    Failed { sink: &'static str, error: String },

    /// Sink unavailable since startup; `warning` is set on the first skip only
    Skipped { warning: Option<String> },

    /// No sink configured
    Disabled,
}

impl LogStatus {
    /// Notice to show next to the explanation, if any
    pub fn notice(&self) -> Option<String> {
        match self {
            LogStatus::Logged { sink } => Some(format!("Logged to {}!", sink_display(sink))),
            LogStatus::Failed { error, .. } => Some(format!("Failed to log result: {}", error)),
            LogStatus::Skipped { warning } => warning.clone(),
            LogStatus::Disabled => None,
        }
    }

    /// True when the row could not be written
    pub fn is_warning(&self) -> bool {
        matches!(self, LogStatus::Failed { .. } | LogStatus::Skipped { warning: Some(_) })
    }
}

fn sink_display(name: &str) -> &str {
    match name {
        "sheets" => "Google Sheets",
        "file" => "log file",
        other => other,
    }
}

enum SinkState {
    Disabled,
    Local(Arc<dyn LogSink>),
    Remote(Arc<dyn RowSink>),
    Unavailable(String),
}

/// The configured sink, resolved once at startup
pub struct SinkHandle {
    state: SinkState,
    warned: AtomicBool,
}

impl std::fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkHandle")
            .field("sink", &self.describe())
            .finish()
    }
}

impl SinkHandle {
    fn with_state(state: SinkState) -> Self {
        Self {
            state,
            warned: AtomicBool::new(false),
        }
    }

    /// No logging
    pub fn disabled() -> Self {
        Self::with_state(SinkState::Disabled)
    }

    /// A sink that only takes log entries (the file sink)
    pub fn local(sink: Arc<dyn LogSink>) -> Self {
        Self::with_state(SinkState::Local(sink))
    }

    /// A remote sink that also takes manual test rows
    pub fn remote(sink: Arc<dyn RowSink>) -> Self {
        Self::with_state(SinkState::Remote(sink))
    }

    /// A sink that failed to set up; appends are skipped
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_state(SinkState::Unavailable(reason.into()))
    }

    /// Warning to show on every page while the sink is unavailable
    pub fn startup_warning(&self) -> Option<String> {
        match self.state {
            SinkState::Unavailable(ref reason) => {
                Some(format!("Logging to the remote sheet failed: {}", reason))
            }
            _ => None,
        }
    }

    /// Human-readable sink description
    pub fn describe(&self) -> String {
        match self.state {
            SinkState::Disabled => "disabled".to_string(),
            SinkState::Local(ref sink) => sink.name().to_string(),
            SinkState::Remote(ref sink) => sink.name().to_string(),
            SinkState::Unavailable(_) => "unavailable".to_string(),
        }
    }

    /// The row an append of `entry` would write, if anything would be written
    pub fn pending_row(&self, entry: &LogEntry) -> Option<Vec<String>> {
        match self.state {
            SinkState::Local(ref sink) => Some(sink.row(entry)),
            SinkState::Remote(ref sink) => Some(sink.row(entry)),
            SinkState::Disabled | SinkState::Unavailable(_) => None,
        }
    }

    /// Append `entry`, absorbing any failure into the returned status
    pub async fn record(&self, entry: &LogEntry) -> LogStatus {
        let result = match self.state {
            SinkState::Disabled => return LogStatus::Disabled,
            SinkState::Unavailable(ref reason) => {
                let first = !self.warned.swap(true, Ordering::SeqCst);
                let warning = first.then(|| format!("Logging skipped: sink unavailable ({})", reason));
                return LogStatus::Skipped { warning };
            }
            SinkState::Local(ref sink) => (sink.name(), sink.append(entry).await),
            SinkState::Remote(ref sink) => (sink.name(), sink.append(entry).await),
        };

        match result {
            (sink, Ok(())) => LogStatus::Logged { sink },
            (sink, Err(e)) => LogStatus::Failed {
                sink,
                error: e.to_string(),
            },
        }
    }

    /// Append the synthetic test row; remote sinks only
    pub async fn append_test_row(&self) -> SinkResult<()> {
        match self.state {
            SinkState::Remote(ref sink) => sink.append_row(&test_row()).await,
            SinkState::Unavailable(ref reason) => Err(SinkError::Unavailable(reason.clone())),
            SinkState::Disabled | SinkState::Local(_) => Err(SinkError::NotRemote),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_records_nothing() {
        let handle = SinkHandle::disabled();
        let status = handle.record(&LogEntry::new("I'm 5", "text")).await;
        assert_eq!(status, LogStatus::Disabled);
        assert!(status.notice().is_none());
    }

    #[tokio::test]
    async fn test_local_sink_logged() {
        let sink = Arc::new(MemorySink::new());
        let handle = SinkHandle::local(sink.clone());

        let status = handle.record(&LogEntry::new("College", "text")).await;
        assert_eq!(status, LogStatus::Logged { sink: "memory" });
        assert_eq!(sink.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_becomes_status() {
        let sink = Arc::new(MemorySink::failing(SinkError::Network("offline".into())));
        let handle = SinkHandle::remote(sink);

        let status = handle.record(&LogEntry::new("College", "text")).await;
        assert!(status.is_warning());
        assert_eq!(
            status.notice().unwrap(),
            "Failed to log result: Network error: offline"
        );
    }

    #[tokio::test]
    async fn test_unavailable_warns_once() {
        let handle = SinkHandle::unavailable("bad credentials");
        assert!(handle.startup_warning().unwrap().contains("bad credentials"));

        let first = handle.record(&LogEntry::new("Intern", "a")).await;
        let second = handle.record(&LogEntry::new("Intern", "b")).await;

        assert!(matches!(first, LogStatus::Skipped { warning: Some(_) }));
        assert_eq!(second, LogStatus::Skipped { warning: None });
        assert!(!second.is_warning());
    }

    #[tokio::test]
    async fn test_test_row_needs_remote() {
        let local = SinkHandle::local(Arc::new(MemorySink::new()));
        assert_eq!(local.append_test_row().await, Err(SinkError::NotRemote));
        assert_eq!(SinkHandle::disabled().append_test_row().await, Err(SinkError::NotRemote));

        let unavailable = SinkHandle::unavailable("no key");
        assert!(matches!(
            unavailable.append_test_row().await,
            Err(SinkError::Unavailable(_))
        ));

        let sink = Arc::new(MemorySink::new());
        let remote = SinkHandle::remote(sink.clone());
        remote.append_test_row().await.unwrap();
        assert_eq!(sink.rows(), vec![test_row()]);
    }

    #[test]
    fn test_pending_row_follows_the_sink() {
        let entry = LogEntry::new("Intern", "z".repeat(70));

        let file = SinkHandle::local(Arc::new(FileSink::new("unused.csv")));
        assert_eq!(file.pending_row(&entry), Some(entry.file_row()));

        let remote = SinkHandle::remote(Arc::new(MemorySink::new()));
        assert_eq!(remote.pending_row(&entry), Some(entry.remote_row()));

        assert_eq!(SinkHandle::disabled().pending_row(&entry), None);
        assert_eq!(SinkHandle::unavailable("x").pending_row(&entry), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(SinkHandle::disabled().describe(), "disabled");
        assert_eq!(SinkHandle::unavailable("x").describe(), "unavailable");
        assert_eq!(SinkHandle::local(Arc::new(MemorySink::new())).describe(), "memory");
    }
}
