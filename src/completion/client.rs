//! # Completion Client Trait

use async_trait::async_trait;

use super::errors::CompletionResult;

/// Model used unless the configuration names another one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str =
    "You're an expert at simplifying complex topics for different audiences.";

/// Sampling temperature
pub const TEMPERATURE: f32 = 0.7;

/// Maximum output length in tokens
pub const MAX_TOKENS: u32 = 300;

/// A single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build a request with the fixed system instruction and sampling settings
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt.into(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Text-in, text-out completion capability.
///
/// Implementations return the raw completion text; trimming is the caller's
/// job.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult<String>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}
