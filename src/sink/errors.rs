//! # Sink Errors

use thiserror::Error;

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Log sink errors.
///
/// Always recovered by the caller: a failed append never affects the
/// explanation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Remote sink rejected append ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    #[error("Test logging needs the remote sheet sink")]
    NotRemote,

    #[error("Malformed log data: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::IoError(e.to_string())
    }
}

impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        SinkError::Network(e.to_string())
    }
}
