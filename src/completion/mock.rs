//! # Mock Completion Client
//!
//! Scripted responses and a record of every request, for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{CompletionClient, CompletionRequest};
use super::errors::{CompletionError, CompletionResult};

/// Completion client that never leaves the process
#[derive(Debug)]
pub struct MockCompletionClient {
    response: CompletionResult<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    /// Always answer with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: CompletionError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
