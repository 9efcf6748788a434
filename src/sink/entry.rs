//! # Log Entries

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// The file sink keeps only this many characters of the input
pub const FILE_INPUT_PREFIX_CHARS: usize = 50;

/// Row written by the manual "test logging" action
pub const TEST_ROW: [&str; 3] = ["Test Time", "Test Level", "Test Input"];

const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const REMOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One logged interaction: when, at which level, with what input.
///
/// Entries are created once per successful explanation and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Local wall-clock time of the request
    pub timestamp: NaiveDateTime,

    /// Level label, e.g. "I'm 5"
    pub level_label: String,

    /// Input text exactly as submitted
    pub input: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(level_label: impl Into<String>, input: impl Into<String>) -> Self {
        Self::at(Local::now().naive_local(), level_label, input)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(
        timestamp: NaiveDateTime,
        level_label: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level_label: level_label.into(),
            input: input.into(),
        }
    }

    /// File sink row: (timestamp, input prefix, level label)
    pub fn file_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(FILE_TIMESTAMP_FORMAT).to_string(),
            truncate_chars(&self.input, FILE_INPUT_PREFIX_CHARS).to_string(),
            self.level_label.clone(),
        ]
    }

    /// Remote sink row: (ISO-8601 timestamp, level label, full input)
    pub fn remote_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(REMOTE_TIMESTAMP_FORMAT).to_string(),
            self.level_label.clone(),
            self.input.clone(),
        ]
    }
}

/// Test logging row as owned strings
pub fn test_row() -> Vec<String> {
    TEST_ROW.iter().map(|s| s.to_string()).collect()
}

/// First `max` characters of `s` (characters, not bytes)
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
