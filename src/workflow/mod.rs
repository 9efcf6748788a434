//! # Explanation Workflow
//!
//! Turns (text, level) into an explanation and a best-effort log row, and
//! owns the two auxiliary form actions: loading an example and test logging.

mod errors;
mod explain;
mod samples;

pub use errors::{ExplainError, ExplainResult, ValidationError};
pub use explain::{validate_input, ExplainWorkflow, Explanation};
pub use samples::{random_example, random_example_with, EXAMPLES};
