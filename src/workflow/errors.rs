//! # Workflow Errors

use thiserror::Error;

use crate::completion::CompletionError;
use crate::levels::LevelError;

/// Result type for explanation requests
pub type ExplainResult<T> = Result<T, ExplainError>;

/// Input rejected before any downstream call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Paste something in first, my guy.")]
    EmptyInput,
}

/// An explanation request that produced no explanation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
}

impl ExplainError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ExplainError::Level(e) => e.status_code(),
            ExplainError::Completion(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExplainError::Level(LevelError::OutOfRange(7)).status_code(), 400);
        assert_eq!(ExplainError::Completion(CompletionError::Timeout).status_code(), 502);
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "Paste something in first, my guy.");
    }
}
