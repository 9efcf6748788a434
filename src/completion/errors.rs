//! # Completion Errors

use thiserror::Error;

/// Result type for completion calls
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Completion service failures.
///
/// None of these are retried; they propagate to whoever asked for the
/// explanation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Request timeout - the completion service took too long to respond")]
    Timeout,

    #[error("Connection error - unable to reach the completion service: {0}")]
    Connect(String),

    #[error("Authentication failed - check your API key")]
    Unauthorized,

    #[error("Access forbidden - insufficient permissions")]
    Forbidden,

    #[error("Rate limit exceeded - too many requests")]
    RateLimited,

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl CompletionError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => CompletionError::Unauthorized,
            403 => CompletionError::Forbidden,
            429 => CompletionError::RateLimited,
            500..=599 => CompletionError::Server { status, body },
            _ => CompletionError::Http { status, body },
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::Timeout => "timeout",
            CompletionError::Connect(_) => "connect",
            CompletionError::Unauthorized => "unauthorized",
            CompletionError::Forbidden => "forbidden",
            CompletionError::RateLimited => "rate_limited",
            CompletionError::Server { .. } => "server",
            CompletionError::Http { .. } => "http",
            CompletionError::Malformed(_) => "malformed",
            CompletionError::Network(_) => "network",
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout
        } else if e.is_connect() {
            CompletionError::Connect(e.to_string())
        } else if e.is_decode() {
            CompletionError::Malformed(e.to_string())
        } else {
            CompletionError::Network(e.to_string())
        }
    }
}
