use std::sync::LazyLock;

use derive_from_env::FromEnv;

use crate::level::{Severity, string_to_level};

/// Live configuration read by the dispatcher and the built-in sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Events below this level are dropped before any sink is consulted.
    pub level: Severity,
    /// Suppresses every event regardless of level.
    pub quiet: bool,
    /// Colorizes the level name of console output.
    pub use_colors: bool,
    pub show_file_line: bool,
    pub show_function: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            quiet: false,
            use_colors: true,
            show_file_line: true,
            show_function: false,
        }
    }
}

/// State applied by `init`: the configuration plus the threshold of the
/// default console sink (`None` installs no console sink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerDefaults {
    pub config: LoggerConfig,
    pub console_level: Option<Severity>,
}

impl Default for LoggerDefaults {
    fn default() -> Self {
        Self {
            config: LoggerConfig::default(),
            console_level: Some(Severity::Trace),
        }
    }
}

#[derive(FromEnv)]
#[from_env(prefix = "LOGGIN")]
#[allow(non_snake_case)]
pub struct LogginEnv {
    #[from_env(default = "INFO")]
    pub LEVEL: String,
    #[from_env(default = "false")]
    pub QUIET: bool,
    #[from_env(default = "true")]
    pub COLORS: bool,
    #[from_env(default = "true")]
    pub SHOW_FILE_LINE: bool,
    #[from_env(default = "false")]
    pub SHOW_FUNCTION: bool,
}

impl LogginEnv {
    pub fn to_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: string_to_level(&self.LEVEL),
            quiet: self.QUIET,
            use_colors: self.COLORS,
            show_file_line: self.SHOW_FILE_LINE,
            show_function: self.SHOW_FUNCTION,
        }
    }
}

/// `LOGGIN_*` environment overrides, read once. `None` when a variable is malformed.
pub static LOGGIN_ENV: LazyLock<Option<LogginEnv>> = LazyLock::new(|| LogginEnv::from_env().ok());

impl LoggerConfig {
    /// Configuration from `LOGGIN_*` variables, falling back to the defaults.
    pub fn from_env() -> Self {
        LOGGIN_ENV
            .as_ref()
            .map(LogginEnv::to_config)
            .unwrap_or_default()
    }
}
