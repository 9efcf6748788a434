//! # In-memory Sink
//!
//! Records entries and raw rows in memory. Can be told to fail every append,
//! which is how the "logging failure never hides the explanation" rule is
//! exercised.

use std::sync::Mutex;

use async_trait::async_trait;

use super::entry::LogEntry;
use super::errors::{SinkError, SinkResult};
use super::{LogSink, RowSink};

#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
    rows: Mutex<Vec<Vec<String>>>,
    fail_with: Option<SinkError>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every append fails with `error`
    pub fn failing(error: SinkError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Entries appended so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Raw rows appended through [`RowSink::append_row`]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len() + self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn append(&self, entry: &LogEntry) -> SinkResult<()> {
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl RowSink for MemorySink {
    async fn append_row(&self, row: &[String]) -> SinkResult<()> {
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(())
    }
}
