//! Observable events
//!
//! Events are explicit and typed; the string form is what lands in the log.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Log sink resolved and ready
    SinkReady,
    /// Log sink could not be set up; appends will be skipped
    SinkUnavailable,
    /// HTTP listener bound
    ServerListening,

    // Explanation requests
    /// Completion request sent
    ExplainStart,
    /// Completion returned
    ExplainComplete,
    /// Completion failed
    ExplainFailed,
    /// Input rejected before any downstream call
    InputRejected,

    // Sink
    /// Log row appended
    LogAppended,
    /// Log row append failed (non-fatal)
    LogFailed,
    /// Log row skipped (sink disabled or unavailable)
    LogSkipped,
    /// Manual test row appended
    TestLogAppended,
    /// Manual test row failed
    TestLogFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SinkReady => "SINK_READY",
            Event::SinkUnavailable => "SINK_UNAVAILABLE",
            Event::ServerListening => "SERVER_LISTENING",

            Event::ExplainStart => "EXPLAIN_START",
            Event::ExplainComplete => "EXPLAIN_COMPLETE",
            Event::ExplainFailed => "EXPLAIN_FAILED",
            Event::InputRejected => "INPUT_REJECTED",

            Event::LogAppended => "LOG_APPENDED",
            Event::LogFailed => "LOG_FAILED",
            Event::LogSkipped => "LOG_SKIPPED",
            Event::TestLogAppended => "TEST_LOG_APPENDED",
            Event::TestLogFailed => "TEST_LOG_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ExplainFailed | Event::TestLogFailed => Severity::Error,
            Event::SinkUnavailable | Event::InputRejected | Event::LogFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
