//! # File Sink
//!
//! CSV file, one line per explanation. The file is opened in append mode,
//! written and closed on every call; no handle is kept between calls.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::csv;
use super::entry::LogEntry;
use super::errors::{SinkError, SinkResult};
use super::LogSink;

/// Append-only CSV log file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`; the file is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row back
    pub async fn read_rows(&self) -> SinkResult<Vec<Vec<String>>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        csv::parse(&content).map_err(SinkError::Malformed)
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn append(&self, entry: &LogEntry) -> SinkResult<()> {
        let line = csv::encode_row(&self.row(entry));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }

    fn row(&self, entry: &LogEntry) -> Vec<String> {
        entry.file_row()
    }
}
