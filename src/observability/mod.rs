//! Observability for eli5
//!
//! Structured JSON event logging. Observability is read-only: it never
//! changes the outcome of a request and never fails the caller.
//!
//! ```ignore
//! use eli5::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ExplainComplete, &[("level", "1")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields; warnings and errors go to stderr
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    match event.severity() {
        Severity::Info => Logger::info(event.as_str(), fields),
        Severity::Warn => Logger::warn(event.as_str(), fields),
        Severity::Error => Logger::error(event.as_str(), fields),
    }
}
