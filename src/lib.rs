//! eli5 - Explain Like I'm 5
//!
//! Rewrites complicated text for one of five reading levels using an
//! external chat completion service, and keeps a best-effort append-only
//! log of every explanation.

pub mod cli;
pub mod completion;
pub mod http_server;
pub mod levels;
pub mod observability;
pub mod sink;
pub mod workflow;
