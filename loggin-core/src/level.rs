use std::{fmt, str::FromStr};

use crate::error::Error;

/// Name returned for integers that are not a valid severity.
pub const UNKNOWN_LEVEL: &str = "UNKNOWN";

/// Severity returned by [`string_to_level`] when the input is not a level name.
pub const DEFAULT_LEVEL: Severity = Severity::Info;

/// Severity of a log event, ordered from `Trace` (0) to `Fatal` (5).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Canonical upper-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<i64> for Severity {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Severity::ALL.get(i).copied())
            .ok_or(Error::InvalidArgument("severity out of range"))
    }
}

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Severity::try_from(i64::from(value))
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or(Error::InvalidArgument("unknown severity name"))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

/// Returns the canonical name of `level`, or `"UNKNOWN"` outside `0..=5`.
pub fn level_to_string(level: i64) -> &'static str {
    Severity::try_from(level)
        .map(Severity::as_str)
        .unwrap_or(UNKNOWN_LEVEL)
}

/// Parses a level name case-insensitively.
/// Empty or unrecognized input yields [`DEFAULT_LEVEL`].
pub fn string_to_level(name: &str) -> Severity {
    name.parse().unwrap_or(DEFAULT_LEVEL)
}
