//! # Completion Service
//!
//! The narrow "complete(request) -> text" capability the explanation
//! workflow depends on, plus its implementations:
//!
//! - [`OpenAiClient`] - OpenAI-compatible chat completions over HTTP
//! - [`MockCompletionClient`] - scripted, in-process

mod client;
mod errors;
mod mock;
mod openai;

pub use client::{
    CompletionClient, CompletionRequest, DEFAULT_MODEL, MAX_TOKENS, SYSTEM_INSTRUCTION,
    TEMPERATURE,
};
pub use errors::{CompletionError, CompletionResult};
pub use mock::MockCompletionClient;
pub use openai::{OpenAiClient, DEFAULT_API_URL};
