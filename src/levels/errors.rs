//! # Level Errors

use thiserror::Error;

/// Result type for level lookups
pub type LevelResult<T> = Result<T, LevelError>;

/// Level lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("Level out of range: {0} (expected 1..=5)")]
    OutOfRange(i64),
}

impl LevelError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            LevelError::OutOfRange(_) => 400,
        }
    }
}
