use chrono::{DateTime, Local};

use crate::{config::LoggerConfig, level::Severity};

/// Call-site metadata supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site<'a> {
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
}

impl<'a> Site<'a> {
    pub const fn new(file: &'a str, function: &'a str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }
}

/// One log call as seen by a sink.
///
/// Built once per call after the global filter passes and shared read-only by
/// every sink invoked for that call. The message is already rendered, so each
/// sink observes exactly the same text. Sinks must not retain the event.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    pub level: Severity,
    pub file: &'a str,
    pub function: &'a str,
    pub line: u32,
    pub message: &'a str,
    /// Captured once per call, before the first sink runs.
    pub time: DateTime<Local>,
    /// Configuration at dispatch time.
    pub config: &'a LoggerConfig,
}
